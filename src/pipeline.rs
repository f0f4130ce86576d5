use std::fs;
use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::info;

use crate::atlas;
use crate::config::PipelineConfig;
use crate::error::{PixelTilerError, Result};
use crate::manifest::{self, Manifest};
use crate::tiling::{self, TileGrid};

/// Summary of a completed pipeline run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub color_count: usize,
    pub tile_count: usize,
    pub skipped_tiles: usize,
    pub duration: Duration,
}

/// Pipeline orchestrator -- drives the atlas and tiling stages in sequence.
pub struct Pipeline;

impl Pipeline {
    /// Run the full conversion pipeline.
    pub fn run(config: &PipelineConfig) -> Result<ProcessingResult> {
        let start = Instant::now();

        config.validate()?;
        info!(input = %config.input.display(), "Starting pipeline");

        let image = decode_image(config)?;
        let (width, height) = image.dimensions();
        info!(width, height, "Decoded input image");

        if config.dry_run {
            info!("--dry-run: scanning input without writing output");
            let color_count = print_dry_run_summary(&image, config)?;
            return Ok(ProcessingResult {
                color_count,
                tile_count: 0,
                skipped_tiles: 0,
                duration: start.elapsed(),
            });
        }

        fs::create_dir_all(&config.output).map_err(|e| {
            PixelTilerError::Output(format!(
                "Failed to create output directory {}: {e}",
                config.output.display()
            ))
        })?;

        info!("Stage 1/3: Atlas");
        let atlas = atlas::build_atlas(&image, &config.atlas);
        let atlas_path = config.output.join(&config.atlas.file_name);
        atlas::write_atlas(&atlas, &atlas_path)?;
        info!(
            path = %atlas_path.display(),
            colors = atlas.color_count,
            "Atlas written"
        );

        info!("Stage 2/3: Tiling");
        let grid = TileGrid::compute(width, height, config.tiling.max_triangles)?;
        info!(
            tiles_x = grid.tiles_x,
            tiles_y = grid.tiles_y,
            cols_per_mesh = grid.cols_per_mesh,
            rows_per_mesh = grid.rows_per_mesh,
            "Splitting into tiles"
        );
        let summary = tiling::generate_tiles(&image, &atlas.uv_map, &grid, &config.output)?;

        info!("Stage 3/3: Manifest");
        let manifest = Manifest {
            atlas: config.atlas.file_name.clone(),
            tex_size: config.atlas.tex_size,
            width,
            height,
            colors: atlas.color_count,
            atlas_cols: atlas.cols,
            atlas_rows: atlas.rows,
            tiles_x: grid.tiles_x,
            tiles_y: grid.tiles_y,
            skipped_tiles: summary.skipped,
            tiles: summary.tiles,
        };
        manifest::write_manifest(&manifest, &config.output)?;

        let duration = start.elapsed();
        info!(
            tiles = manifest.tiles.len(),
            skipped = manifest.skipped_tiles,
            elapsed = ?duration,
            "Pipeline complete"
        );

        Ok(ProcessingResult {
            color_count: atlas.color_count,
            tile_count: manifest.tiles.len(),
            skipped_tiles: manifest.skipped_tiles,
            duration,
        })
    }
}

/// Decode the input image to RGBA8.
fn decode_image(config: &PipelineConfig) -> Result<RgbaImage> {
    let img = image::open(&config.input).map_err(|e| {
        PixelTilerError::Input(format!(
            "Failed to decode {}: {e}",
            config.input.display()
        ))
    })?;
    Ok(img.to_rgba8())
}

/// Print image and grid stats without producing any file.
///
/// Returns the visible-color count for the run summary.
fn print_dry_run_summary(image: &RgbaImage, config: &PipelineConfig) -> Result<usize> {
    let (width, height) = image.dimensions();
    let colors = atlas::collect_visible_colors(image);
    let packed = colors.len().min(config.atlas.capacity());
    let (cols, rows) = atlas::grid_shape(packed);
    let grid = TileGrid::compute(width, height, config.tiling.max_triangles)?;

    println!("=== Dry Run Summary ===");
    println!("  Image:        {width}x{height}");
    println!("  Colors:       {} visible", colors.len());
    if packed < colors.len() {
        println!("  Truncated to: {packed} (atlas capacity)");
    }
    println!("  Atlas grid:   {cols}x{rows} cells in {0}x{0}", config.atlas.tex_size);
    println!(
        "  Tile grid:    {}x{} tiles of {}x{} px",
        grid.tiles_x, grid.tiles_y, grid.cols_per_mesh, grid.rows_per_mesh
    );
    println!("  Tiles:        {} before transparency elision", grid.tile_count());

    Ok(packed)
}
