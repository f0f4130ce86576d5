//! Mesh Tiler: partitions the source image into rectangular tiles sized to a
//! triangle budget and emits one OBJ file of per-pixel quads per tile that
//! contains at least one visible pixel.

pub mod mesher;
pub mod obj_writer;

use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PixelTilerError, Result};
use crate::types::UvMap;

/// Axis-aligned pixel rectangle `[x_start, x_end) x [y_start, y_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x_start: u32,
    pub x_end: u32,
    pub y_start: u32,
    pub y_end: u32,
}

impl TileRect {
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Row-major partition of an image into near-square tiles that respect a
/// triangle budget (2 triangles per pixel quad).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Source image extent.
    pub width: u32,
    pub height: u32,
    /// Interior tile shape in pixels; boundary tiles are clipped.
    pub cols_per_mesh: u32,
    pub rows_per_mesh: u32,
    /// Tile counts along each axis.
    pub tiles_x: u32,
    pub tiles_y: u32,
}

impl TileGrid {
    /// Compute the partition for an image and a triangle budget.
    ///
    /// The tile shape is the largest near-square rectangle whose pixel count
    /// stays within `max_triangles / 2`, bounded by the image extent.
    pub fn compute(width: u32, height: u32, max_triangles: usize) -> Result<TileGrid> {
        if width == 0 || height == 0 {
            return Err(PixelTilerError::Tiling(format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        let max_pixels = max_triangles / 2;
        if max_pixels == 0 {
            return Err(PixelTilerError::Validation(
                "triangle budget must be at least 2 (one pixel quad)".into(),
            ));
        }

        let cols_per_mesh = width.min(max_pixels.isqrt() as u32);
        let rows_per_mesh = height.min((max_pixels / cols_per_mesh as usize) as u32);

        Ok(TileGrid {
            width,
            height,
            cols_per_mesh,
            rows_per_mesh,
            tiles_x: width.div_ceil(cols_per_mesh),
            tiles_y: height.div_ceil(rows_per_mesh),
        })
    }

    /// Total number of tiles, including ones that may later be skipped.
    pub fn tile_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    /// Pixel rectangle of the tile at `(tile_x, tile_y)`, clipped to the
    /// image edge.
    pub fn tile_rect(&self, tile_x: u32, tile_y: u32) -> TileRect {
        let x_start = tile_x * self.cols_per_mesh;
        let y_start = tile_y * self.rows_per_mesh;
        TileRect {
            x_start,
            x_end: (x_start + self.cols_per_mesh).min(self.width),
            y_start,
            y_end: (y_start + self.rows_per_mesh).min(self.height),
        }
    }

    /// Tile coordinates in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (tiles_x, tiles_y) = (self.tiles_x, self.tiles_y);
        (0..tiles_y).flat_map(move |ty| (0..tiles_x).map(move |tx| (tx, ty)))
    }
}

/// Record of one written mesh tile.
#[derive(Debug, Clone, Serialize)]
pub struct TileRecord {
    pub tile_x: u32,
    pub tile_y: u32,
    pub file: String,
    pub faces: usize,
}

/// Outcome of the tiling stage.
#[derive(Debug)]
pub struct TilingSummary {
    /// Written tiles in row-major order.
    pub tiles: Vec<TileRecord>,
    /// Tiles elided because every pixel was fully transparent.
    pub skipped: usize,
}

/// Mesh every tile of the grid and write the OBJ files.
///
/// Tiles are fully independent (each writes only its own file), so emission
/// fans out across the rayon pool; the collected records keep row-major
/// order regardless.
pub fn generate_tiles(
    image: &RgbaImage,
    uv_map: &UvMap,
    grid: &TileGrid,
    out_dir: &Path,
) -> Result<TilingSummary> {
    let coords: Vec<(u32, u32)> = grid.tiles().collect();

    let results: Vec<Option<TileRecord>> = coords
        .par_iter()
        .map(|&(tile_x, tile_y)| {
            let rect = grid.tile_rect(tile_x, tile_y);

            let Some(mesh) = mesher::mesh_tile(image, uv_map, rect, tile_x, tile_y) else {
                debug!(tile_x, tile_y, "Skipping fully transparent tile");
                return Ok(None);
            };

            let file = format!("pixel_mesh_{tile_x}_{tile_y}.obj");
            obj_writer::write_obj(&mesh, &out_dir.join(&file))?;
            debug!(tile_x, tile_y, faces = mesh.face_count(), "Wrote tile");

            Ok(Some(TileRecord {
                tile_x,
                tile_y,
                file,
                faces: mesh.face_count(),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let tiles: Vec<TileRecord> = results.into_iter().flatten().collect();
    let skipped = coords.len() - tiles.len();

    info!(
        written = tiles.len(),
        skipped, "Tiling complete"
    );

    Ok(TilingSummary { tiles, skipped })
}
