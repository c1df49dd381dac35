//! Unified error type for the pipeline stages.
//!
//! [`PipelineError`] is returned by every fallible stage so that the
//! orchestrator can propagate failures with `?` and abort on the first one.

use crate::palette::PaletteError;
use std::fmt;

/// Error returned by pipeline stages and image construction.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{quantize, PipelineError, PixelImage, Rgb};
///
/// let image = PixelImage::filled(2, 2, Rgb::new(1, 2, 3)).unwrap();
/// let err = quantize(&image, 0).unwrap_err();
/// assert!(matches!(err, PipelineError::InvalidParameter { name: "levels", .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A numeric argument is outside its valid range (programming or
    /// configuration defect; fatal to the current run only).
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: usize,
    },
    /// The palette is unusable (fatal at startup).
    Configuration(PaletteError),
}

impl PipelineError {
    #[inline]
    pub(crate) fn invalid(name: &'static str, value: usize) -> Self {
        PipelineError::InvalidParameter { name, value }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {}: {}", name, value)
            }
            PipelineError::Configuration(err) => write!(f, "configuration error: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for PipelineError {
    fn from(err: PaletteError) -> Self {
        PipelineError::Configuration(err)
    }
}
