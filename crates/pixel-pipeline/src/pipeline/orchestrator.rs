//! [`PixelArtPipeline`]: the full photo → pixel-art recipe.

use std::sync::Arc;

use super::config::PipelineConfig;
use crate::error::PipelineError;
use crate::image::PixelImage;
use crate::pad::pad_to_square;
use crate::palette::Palette;
use crate::quantize::quantize;
use crate::resample::{resize, ResampleFilter};
use crate::snap::snap;

/// Runs the fixed stage sequence over one image at a time.
///
/// Stages, in order:
///
/// 0. pad to square (only when [`PipelineConfig::pad_to_square`] is set)
/// 1. quantize to `first_quantize_levels` colors
/// 2. resize to `pixel_size`×`pixel_size` with the configured filter
/// 3. quantize to `second_quantize_levels` colors
/// 4. snap every pixel to the palette
/// 5. resize to `output_size`×`output_size` with nearest-neighbor
///
/// The first failing stage aborts the run. The palette is shared behind an
/// [`Arc`] and never mutated, so one pipeline can serve concurrent callers.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{Palette, PixelArtPipeline, PixelImage, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FF0000", "#FFFFFF"]).unwrap();
/// let pipeline = PixelArtPipeline::new(palette).pixel_size(8);
///
/// let photo = PixelImage::filled(64, 64, Rgb::new(255, 0, 0)).unwrap();
/// let art = pipeline.process(&photo).unwrap();
///
/// assert_eq!((art.width(), art.height()), (512, 512));
/// assert_eq!(art.distinct_colors(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PixelArtPipeline {
    palette: Arc<Palette>,
    config: PipelineConfig,
}

impl PixelArtPipeline {
    /// Create a pipeline with the default recipe.
    pub fn new(palette: impl Into<Arc<Palette>>) -> Self {
        Self::with_config(palette, PipelineConfig::default())
    }

    pub fn with_config(palette: impl Into<Arc<Palette>>, config: PipelineConfig) -> Self {
        Self {
            palette: palette.into(),
            config,
        }
    }

    /// Set the pixel grid size.
    #[inline]
    pub fn pixel_size(mut self, size: u32) -> Self {
        self.config.pixel_size = size;
        self
    }

    /// Set the downscale filter.
    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.config.filter = filter;
        self
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on `image` and return the final pixel-art image.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidParameter`] if a configured size or level is
    /// zero.
    pub fn process(&self, image: &PixelImage) -> Result<PixelImage, PipelineError> {
        let config = &self.config;
        config.validate()?;

        let padded;
        let input = match config.pad_to_square {
            Some(fill) => {
                padded = pad_to_square(image, fill);
                &padded
            }
            None => image,
        };

        let reduced = quantize(input, config.first_quantize_levels)?;
        let grid = resize(&reduced, config.pixel_size, config.pixel_size, config.filter)?;
        let grid = quantize(&grid, config.second_quantize_levels)?;
        let snapped = snap(&grid, &self.palette);
        resize(
            &snapped,
            config.output_size,
            config.output_size,
            ResampleFilter::Nearest,
        )
    }
}
