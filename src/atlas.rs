//! Atlas Builder: packs every distinct visible color of the source image
//! into a grid of cells on a fixed-size square texture, and records the
//! normalized cell center for each color.

use std::collections::HashSet;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::config::AtlasConfig;
use crate::error::{PixelTilerError, Result};
use crate::types::{ColorKey, UvMap, is_visible};

/// Output of the atlas build stage.
#[derive(Debug)]
pub struct ColorAtlas {
    /// The packed `tex_size x tex_size` RGBA texture.
    pub texture: RgbaImage,
    /// Color key -> cell-center UV, one entry per packed color.
    pub uv_map: UvMap,
    /// Number of colors packed (post-truncation).
    pub color_count: usize,
    /// Grid shape; `cols * rows >= color_count`.
    pub cols: u32,
    pub rows: u32,
}

/// Collect the distinct visible colors of an image.
///
/// Returned in first-appearance order of a row-major scan, so truncation of
/// an over-capacity palette is deterministic and reproducible.
pub fn collect_visible_colors(image: &RgbaImage) -> Vec<ColorKey> {
    let mut seen: HashSet<ColorKey> = HashSet::new();
    let mut colors = Vec::new();

    for pixel in image.pixels() {
        let color = pixel.0;
        if is_visible(color) && seen.insert(color) {
            colors.push(color);
        }
    }

    colors
}

/// Near-square grid shape for `num_colors` cells.
///
/// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`, so capacity always
/// covers the color count. Returns `(0, 0)` for an empty palette.
pub fn grid_shape(num_colors: usize) -> (u32, u32) {
    if num_colors == 0 {
        return (0, 0);
    }
    let cols = (num_colors as f64).sqrt().ceil() as u32;
    let rows = num_colors.div_ceil(cols as usize) as u32;
    (cols, rows)
}

/// Build the color atlas for a decoded image.
///
/// Colors beyond the atlas capacity (`tex_size^2`) are dropped, not merged;
/// that is a logged, accepted lossy policy rather than an error. An image
/// with no visible pixel yields a fully transparent black atlas and an
/// empty UV map.
pub fn build_atlas(image: &RgbaImage, config: &AtlasConfig) -> ColorAtlas {
    let tex_size = config.tex_size;
    let mut colors = collect_visible_colors(image);

    if colors.len() > config.capacity() {
        info!(
            found = colors.len(),
            kept = config.capacity(),
            "Color count exceeds atlas capacity, truncating"
        );
        colors.truncate(config.capacity());
    }

    let num_colors = colors.len();
    info!(colors = num_colors, "Collected visible colors");

    let mut texture = RgbaImage::new(tex_size, tex_size);
    let mut uv_map = UvMap::default();

    // Degenerate input: nothing visible, leave the atlas transparent black
    if num_colors == 0 {
        return ColorAtlas {
            texture,
            uv_map,
            color_count: 0,
            cols: 0,
            rows: 0,
        };
    }

    let (cols, rows) = grid_shape(num_colors);
    debug!(cols, rows, "Atlas grid");

    let cell_w = tex_size as f64 / cols as f64;
    let cell_h = tex_size as f64 / rows as f64;

    for (i, &color) in colors.iter().enumerate() {
        let (x_start, x_end, y_start, y_end) = cell_bounds(i, cols, cell_w, cell_h);
        fill_rect(&mut texture, x_start, x_end, y_start, y_end, color);

        let u = (x_start + x_end) as f64 / (2.0 * tex_size as f64);
        let v = (y_start + y_end) as f64 / (2.0 * tex_size as f64);
        uv_map.insert(color, [u, v]);
    }

    // Trailing cells get the last packed color at full opacity so the atlas
    // has no undefined texels
    let last = colors[num_colors - 1];
    let filler = [last[0], last[1], last[2], 255];
    for i in num_colors..(cols as usize * rows as usize) {
        let (x_start, x_end, y_start, y_end) = cell_bounds(i, cols, cell_w, cell_h);
        fill_rect(&mut texture, x_start, x_end, y_start, y_end, filler);
    }

    ColorAtlas {
        texture,
        uv_map,
        color_count: num_colors,
        cols,
        rows,
    }
}

/// Write the atlas texture as a PNG.
pub fn write_atlas(atlas: &ColorAtlas, path: &Path) -> Result<()> {
    atlas.texture.save(path).map_err(|e| {
        PixelTilerError::Output(format!("Failed to write atlas {}: {e}", path.display()))
    })
}

/// Integer pixel bounds of cell `i`, truncated from f64 cell extents.
fn cell_bounds(i: usize, cols: u32, cell_w: f64, cell_h: f64) -> (u32, u32, u32, u32) {
    let col = (i % cols as usize) as f64;
    let row = (i / cols as usize) as f64;

    let x_start = (col * cell_w) as u32;
    let x_end = ((col + 1.0) * cell_w) as u32;
    let y_start = (row * cell_h) as u32;
    let y_end = ((row + 1.0) * cell_h) as u32;

    (x_start, x_end, y_start, y_end)
}

fn fill_rect(texture: &mut RgbaImage, x_start: u32, x_end: u32, y_start: u32, y_end: u32, color: ColorKey) {
    for y in y_start..y_end {
        for x in x_start..x_end {
            texture.put_pixel(x, y, Rgba(color));
        }
    }
}
