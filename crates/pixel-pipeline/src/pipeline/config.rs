//! Pipeline configuration.

use crate::color::Rgba;
use crate::error::PipelineError;
use crate::resample::ResampleFilter;

/// Parameters of the pixel-art recipe.
///
/// # Defaults
///
/// - pixel_size: 32 (working grid is 32×32)
/// - filter: `Nearest`
/// - first_quantize_levels: 128
/// - second_quantize_levels: 15
/// - output_size: 512
/// - pad_to_square: disabled
///
/// # Example
///
/// ```
/// use pixel_pipeline::{PipelineConfig, ResampleFilter};
///
/// let config = PipelineConfig::new()
///     .pixel_size(48)
///     .filter(ResampleFilter::Box);
/// assert_eq!(config.pixel_size, 48);
/// assert_eq!(config.output_size, 512);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Side length of the intermediate pixel grid.
    pub pixel_size: u32,

    /// Filter for the downscale to the pixel grid. The final upscale always
    /// uses nearest-neighbor.
    pub filter: ResampleFilter,

    /// Color budget before downscaling.
    pub first_quantize_levels: usize,

    /// Color budget after downscaling, before palette snapping.
    pub second_quantize_levels: usize,

    /// Side length of the final image.
    pub output_size: u32,

    /// Fill color for centering the input on a square canvas before
    /// processing. `None` leaves the input as is.
    pub pad_to_square: Option<Rgba>,
}

impl PipelineConfig {
    pub const DEFAULT_PIXEL_SIZE: u32 = 32;
    pub const DEFAULT_FIRST_QUANTIZE_LEVELS: usize = 128;
    pub const DEFAULT_SECOND_QUANTIZE_LEVELS: usize = 15;
    pub const DEFAULT_OUTPUT_SIZE: u32 = 512;

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pixel_size(mut self, size: u32) -> Self {
        self.pixel_size = size;
        self
    }

    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    #[inline]
    pub fn first_quantize_levels(mut self, levels: usize) -> Self {
        self.first_quantize_levels = levels;
        self
    }

    #[inline]
    pub fn second_quantize_levels(mut self, levels: usize) -> Self {
        self.second_quantize_levels = levels;
        self
    }

    #[inline]
    pub fn output_size(mut self, size: u32) -> Self {
        self.output_size = size;
        self
    }

    /// Enable square padding with the given fill color.
    #[inline]
    pub fn pad_to_square(mut self, fill: Option<Rgba>) -> Self {
        self.pad_to_square = fill;
        self
    }

    /// Check that every size and level is at least 1.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.pixel_size == 0 {
            return Err(PipelineError::invalid("pixel_size", 0));
        }
        if self.first_quantize_levels == 0 {
            return Err(PipelineError::invalid("first_quantize_levels", 0));
        }
        if self.second_quantize_levels == 0 {
            return Err(PipelineError::invalid("second_quantize_levels", 0));
        }
        if self.output_size == 0 {
            return Err(PipelineError::invalid("output_size", 0));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pixel_size: Self::DEFAULT_PIXEL_SIZE,
            filter: ResampleFilter::Nearest,
            first_quantize_levels: Self::DEFAULT_FIRST_QUANTIZE_LEVELS,
            second_quantize_levels: Self::DEFAULT_SECOND_QUANTIZE_LEVELS,
            output_size: Self::DEFAULT_OUTPUT_SIZE,
            pad_to_square: None,
        }
    }
}
