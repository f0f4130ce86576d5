use std::path::PathBuf;

use clap::Parser;

use crate::error::{PixelTilerError, Result};

/// Atlas construction parameters.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Side length of the square atlas texture in pixels.
    pub tex_size: u32,
    /// File name of the atlas PNG inside the output directory.
    pub file_name: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            tex_size: 1024,
            file_name: "color_atlas.png".into(),
        }
    }
}

impl AtlasConfig {
    /// Number of color cells the atlas can hold.
    pub fn capacity(&self) -> usize {
        self.tex_size as usize * self.tex_size as usize
    }
}

/// Tiling parameters.
#[derive(Debug, Clone)]
pub struct TilingConfig {
    /// Max triangles per mesh tile; each pixel quad costs 2.
    pub max_triangles: usize,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            max_triangles: 10_000,
        }
    }
}

/// Fully resolved pipeline configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub atlas: AtlasConfig,
    pub tiling: TilingConfig,
    pub dry_run: bool,
    pub verbose: bool,
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            atlas: AtlasConfig::default(),
            tiling: TilingConfig::default(),
            dry_run: false,
            verbose: false,
            threads: None,
        }
    }
}

impl PipelineConfig {
    /// Reject parameter combinations no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if self.atlas.tex_size == 0 {
            return Err(PixelTilerError::Validation(
                "atlas texture size must be at least 1".into(),
            ));
        }
        if self.tiling.max_triangles < 2 {
            return Err(PixelTilerError::Validation(
                "triangle budget must be at least 2 (one pixel quad)".into(),
            ));
        }
        Ok(())
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "pixel-tiler",
    about = "Pixel art to color-atlas texture and per-pixel quad mesh converter",
    version
)]
pub struct CliArgs {
    /// Input image (PNG, JPEG, WebP -- anything decodable to RGBA8)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output directory
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Atlas texture side in pixels
    #[arg(long, default_value_t = 1024)]
    pub tex_size: u32,

    /// Atlas file name inside the output directory
    #[arg(long, default_value = "color_atlas.png")]
    pub atlas_name: String,

    /// Max triangles per mesh tile (each pixel quad costs 2)
    #[arg(long, default_value_t = 10_000)]
    pub max_triangles: usize,

    /// Scan input and report stats without writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for PipelineConfig {
    fn from(args: CliArgs) -> Self {
        PipelineConfig {
            input: args.input,
            output: args.output,
            atlas: AtlasConfig {
                tex_size: args.tex_size,
                file_name: args.atlas_name,
            },
            tiling: TilingConfig {
                max_triangles: args.max_triangles,
            },
            dry_run: args.dry_run,
            verbose: args.verbose,
            threads: args.threads,
        }
    }
}
