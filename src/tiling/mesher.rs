use image::RgbaImage;

use crate::transform::pixel_quad_corners;
use crate::types::{TileMesh, UvMap, is_visible};

use super::TileRect;

/// Whether every pixel in the rectangle is fully transparent (alpha = 0).
pub fn is_rect_fully_transparent(image: &RgbaImage, rect: &TileRect) -> bool {
    for y in rect.y_start..rect.y_end {
        for x in rect.x_start..rect.x_end {
            if image.get_pixel(x, y).0[3] > 0 {
                return false;
            }
        }
    }
    true
}

/// Build the per-pixel quad mesh for one tile.
///
/// Returns `None` when the tile is fully transparent, eliding it from the
/// output entirely. Otherwise every pixel of the tile is scanned row-major
/// and contributes 4 vertices and 4 identical UV entries (its color's atlas
/// cell center, or the origin fallback); only pixels with alpha > 0 get a
/// face, so invisible pixels leave orphaned vertex/UV slots behind.
pub fn mesh_tile(
    image: &RgbaImage,
    uv_map: &UvMap,
    rect: TileRect,
    tile_x: u32,
    tile_y: u32,
) -> Option<TileMesh> {
    if is_rect_fully_transparent(image, &rect) {
        return None;
    }

    let height = image.height();
    let mut mesh = TileMesh::with_capacity(tile_x, tile_y, rect.pixel_count());
    let mut next_index: u32 = 0;

    for y in rect.y_start..rect.y_end {
        for x in rect.x_start..rect.x_end {
            let color = image.get_pixel(x, y).0;

            for corner in pixel_quad_corners(x, y, height) {
                mesh.positions.extend_from_slice(&corner);
            }

            let uv = uv_map.uv(color);
            for _ in 0..4 {
                mesh.uvs.extend_from_slice(&uv);
            }

            if is_visible(color) {
                mesh.faces
                    .push([next_index, next_index + 1, next_index + 2, next_index + 3]);
            }

            // Index slots advance whether or not a face was emitted
            next_index += 4;
        }
    }

    Some(mesh)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn full_rect(image: &RgbaImage) -> TileRect {
        TileRect {
            x_start: 0,
            x_end: image.width(),
            y_start: 0,
            y_end: image.height(),
        }
    }

    fn uv_map_for(image: &RgbaImage) -> UvMap {
        let mut map = UvMap::default();
        for (i, color) in crate::atlas::collect_visible_colors(image)
            .into_iter()
            .enumerate()
        {
            map.insert(color, [0.1 * i as f64, 0.2 * i as f64]);
        }
        map
    }

    #[test]
    fn fully_transparent_tile_is_elided() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([50, 60, 70, 0]));
        let rect = full_rect(&img);

        assert!(is_rect_fully_transparent(&img, &rect));
        assert!(mesh_tile(&img, &UvMap::default(), rect, 0, 0).is_none());
    }

    #[test]
    fn single_visible_pixel_keeps_whole_tile() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
        let rect = full_rect(&img);

        assert!(!is_rect_fully_transparent(&img, &rect));
        let mesh = mesh_tile(&img, &uv_map_for(&img), rect, 0, 0).unwrap();

        // All 4 pixels emit vertices and UVs, only the visible one a face
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.uv_count(), 16);
        assert_eq!(mesh.face_count(), 1);
        // The face references the last pixel's slots
        assert_eq!(mesh.faces[0], [12, 13, 14, 15]);
    }

    #[test]
    fn opaque_tile_gets_one_face_per_pixel() {
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let mesh = mesh_tile(&img, &uv_map_for(&img), full_rect(&img), 0, 0).unwrap();

        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.triangle_count(), 12);
        // Faces reference consecutive quads in scan order
        assert_eq!(mesh.faces[0], [0, 1, 2, 3]);
        assert_eq!(mesh.faces[5], [20, 21, 22, 23]);
    }

    #[test]
    fn quad_positions_are_y_flipped() {
        let img = RgbaImage::from_pixel(1, 2, Rgba([1, 2, 3, 255]));
        let mesh = mesh_tile(&img, &uv_map_for(&img), full_rect(&img), 0, 0).unwrap();

        // Pixel (0,0) of a 2-tall image: top edge at mesh Y = 2
        assert_eq!(&mesh.positions[0..3], &[0.0, 2.0, 0.0]);
        // Pixel (0,1): top edge at mesh Y = 1, bottom at 0
        assert_eq!(&mesh.positions[12..15], &[0.0, 1.0, 0.0]);
        assert_eq!(&mesh.positions[21..24], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn uv_entries_repeat_per_quad_with_fallback() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([5, 5, 5, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let mut map = UvMap::default();
        map.insert([5, 5, 5, 255], [0.3, 0.7]);

        let mesh = mesh_tile(&img, &map, full_rect(&img), 0, 0).unwrap();

        // Visible pixel: 4 copies of its cell center
        assert_eq!(&mesh.uvs[0..8], &[0.3, 0.7, 0.3, 0.7, 0.3, 0.7, 0.3, 0.7]);
        // Transparent pixel is absent from the map: origin fallback
        assert_eq!(&mesh.uvs[8..16], &[0.0; 8]);
    }

    #[test]
    fn sub_rect_meshes_only_its_pixels() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let rect = TileRect {
            x_start: 2,
            x_end: 4,
            y_start: 0,
            y_end: 2,
        };

        let mesh = mesh_tile(&img, &uv_map_for(&img), rect, 1, 0).unwrap();
        assert_eq!(mesh.tile_x, 1);
        assert_eq!(mesh.tile_y, 0);
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 4);
        // First quad sits at x = 2 in the image's global frame
        assert_eq!(&mesh.positions[0..3], &[2.0, 4.0, 0.0]);
    }
}
