use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pixel_tiler::config::{CliArgs, PipelineConfig};
use pixel_tiler::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("pixel_tiler=debug")
    } else {
        EnvFilter::new("pixel_tiler=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config: PipelineConfig = args.into();

    // Configure rayon thread pool
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            println!(
                "Done: {} colors, {} mesh tiles ({} skipped) in {:.2}s",
                result.color_count,
                result.tile_count,
                result.skipped_tiles,
                result.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(%e, "Pipeline failed");
            Err(anyhow::anyhow!(e)).context("pixel-tiler pipeline failed")
        }
    }
}
