//! The end-to-end pixel-art recipe.

mod config;
mod orchestrator;

pub use config::PipelineConfig;
pub use orchestrator::PixelArtPipeline;
