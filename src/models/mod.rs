pub mod config;

pub use config::{AppConfig, ColorEntry, PipelineSettings, ServerSettings};
