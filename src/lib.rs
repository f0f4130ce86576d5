pub mod atlas;
pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod tiling;
pub mod transform;
pub mod types;

pub use config::{AtlasConfig, PipelineConfig, TilingConfig};
pub use pipeline::Pipeline;
