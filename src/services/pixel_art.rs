use std::sync::Arc;
use std::time::Instant;

use pixel_pipeline::{
    used_colors, Palette, PipelineConfig, PixelArtPipeline, ResampleFilter, Rgba, UsedColor,
};

use crate::codec::{decode, encode_png};
use crate::error::{ConfigError, ProcessError};
use crate::models::AppConfig;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Optimized PNG bytes
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Colors of the result in first-appearance order
    pub colors: Vec<UsedColor>,
}

/// Per-request overrides of the configured recipe.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub pixel_size: Option<u32>,
    /// Filter name; unknown names mean nearest
    pub filter: Option<String>,
    pub pad_to_square: Option<bool>,
}

/// Decodes uploads, runs the pixel-art pipeline and encodes the result.
pub struct PixelArtService {
    pipeline: PixelArtPipeline,
    /// Fill used when a request turns padding on and the config has it off
    pad_color: Rgba,
}

impl PixelArtService {
    pub fn new(palette: Arc<Palette>, config: PipelineConfig) -> Self {
        let pad_color = config.pad_to_square.unwrap_or(Rgba::TRANSPARENT);
        Self {
            pipeline: PixelArtPipeline::with_config(palette, config),
            pad_color,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let palette = Arc::new(config.build_palette()?);
        Ok(Self {
            pipeline: PixelArtPipeline::with_config(palette, config.pipeline_config()?),
            pad_color: config.pad_color()?,
        })
    }

    pub fn palette(&self) -> &Arc<Palette> {
        self.pipeline.palette()
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// Pipeline for one request, with overrides applied.
    fn pipeline_for(&self, options: &ProcessOptions) -> PixelArtPipeline {
        let mut config = self.config().clone();
        if let Some(size) = options.pixel_size {
            config.pixel_size = size;
        }
        if let Some(ref name) = options.filter {
            config.filter = ResampleFilter::from_name(name);
        }
        match options.pad_to_square {
            Some(true) if config.pad_to_square.is_none() => {
                config.pad_to_square = Some(self.pad_color)
            }
            Some(false) => config.pad_to_square = None,
            _ => {}
        }
        PixelArtPipeline::with_config(Arc::clone(self.palette()), config)
    }

    /// Run decode, pipeline and encode on the current thread.
    pub fn process_sync(
        &self,
        bytes: &[u8],
        options: &ProcessOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        run(&self.pipeline_for(options), bytes)
    }

    /// Run the full recipe on an uploaded file.
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime during the
    /// CPU-intensive decode, quantize and encode steps.
    pub async fn process(
        &self,
        bytes: Vec<u8>,
        options: ProcessOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        let pipeline = self.pipeline_for(&options);

        tokio::task::spawn_blocking(move || run(&pipeline, &bytes))
            .await
            .map_err(|e| ProcessError::Task(e.to_string()))?
    }
}

fn run(pipeline: &PixelArtPipeline, bytes: &[u8]) -> Result<ProcessOutput, ProcessError> {
    let start = Instant::now();
    let input = decode(bytes)?;
    let config = pipeline.config();

    let output = pipeline.process(&input)?;
    let colors = used_colors(&output);
    let png = encode_png(&output)?;

    tracing::info!(
        input_width = input.width(),
        input_height = input.height(),
        pixel_size = config.pixel_size,
        filter = %config.filter,
        colors = colors.len(),
        bytes = png.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Processed image"
    );

    Ok(ProcessOutput {
        png,
        width: output.width(),
        height: output.height(),
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_pipeline::{PixelImage, Rgb};

    fn service() -> PixelArtService {
        let palette = Palette::new(vec![
            Rgb::new(0, 0, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(255, 255, 255),
        ])
        .unwrap();
        PixelArtService::new(Arc::new(palette), PipelineConfig::default())
    }

    fn red_png(width: u32, height: u32) -> Vec<u8> {
        let image = PixelImage::filled(width, height, Rgb::new(255, 0, 0)).unwrap();
        encode_png(&image).unwrap()
    }

    #[test]
    fn test_process_sync_red() {
        let out = service()
            .process_sync(&red_png(64, 64), &ProcessOptions::default())
            .unwrap();
        assert_eq!((out.width, out.height), (512, 512));
        assert_eq!(out.colors.len(), 1);
        assert_eq!(out.colors[0].hex, "#ff0000");

        let decoded = decode(&out.png).unwrap();
        assert_eq!(decoded.rgb_at(511, 511), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_invalid_bytes() {
        let err = service()
            .process_sync(b"hello", &ProcessOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
    }

    #[test]
    fn test_overrides() {
        let svc = service();
        let options = ProcessOptions {
            pixel_size: Some(8),
            filter: Some("box".to_string()),
            pad_to_square: Some(true),
        };
        let pipeline = svc.pipeline_for(&options);
        assert_eq!(pipeline.config().pixel_size, 8);
        assert_eq!(pipeline.config().filter, ResampleFilter::Box);
        assert_eq!(pipeline.config().pad_to_square, Some(Rgba::TRANSPARENT));

        let shouted = ProcessOptions {
            filter: Some("BOX".to_string()),
            ..Default::default()
        };
        assert_eq!(svc.pipeline_for(&shouted).config().filter, ResampleFilter::Nearest);

        // the shared config is untouched
        assert_eq!(svc.config().pixel_size, 32);
        assert!(Arc::ptr_eq(svc.palette(), pipeline.palette()));
    }

    #[test]
    fn test_zero_pixel_size_is_pipeline_error() {
        let options = ProcessOptions {
            pixel_size: Some(0),
            ..Default::default()
        };
        let err = service().process_sync(&red_png(4, 4), &options).unwrap_err();
        assert!(matches!(err, ProcessError::Pipeline(_)));
    }

    #[tokio::test]
    async fn test_process_async() {
        let options = ProcessOptions {
            pixel_size: Some(4),
            ..Default::default()
        };
        let out = service().process(red_png(10, 20), options).await.unwrap();
        assert_eq!((out.width, out.height), (512, 512));
    }
}
