use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{PixelTilerError, Result};
use crate::tiling::TileRecord;

/// Machine-readable summary of a completed run, written next to the tiles.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Atlas file name relative to the output directory.
    pub atlas: String,
    pub tex_size: u32,
    /// Source image extent.
    pub width: u32,
    pub height: u32,
    /// Distinct visible colors packed into the atlas (post-truncation).
    pub colors: usize,
    pub atlas_cols: u32,
    pub atlas_rows: u32,
    /// Tile grid shape.
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Fully transparent tiles elided from the output.
    pub skipped_tiles: usize,
    /// Written tiles in row-major order.
    pub tiles: Vec<TileRecord>,
}

/// Write `manifest.json` into the output directory.
pub fn write_manifest(manifest: &Manifest, out_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| PixelTilerError::Output(format!("Failed to serialize manifest: {e}")))?;

    let path = out_dir.join("manifest.json");
    fs::write(&path, json).map_err(|e| {
        PixelTilerError::Output(format!("Failed to write {}: {e}", path.display()))
    })
}
