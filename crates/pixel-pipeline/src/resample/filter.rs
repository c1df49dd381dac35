//! Resampling filter selection and kernel definitions.

use std::f64::consts::PI;
use std::fmt;

/// Interpolation kernel used by [`resize()`](crate::resize).
///
/// Resolution from an external name never fails: anything that is not exactly
/// one of the six lowercase names selects [`ResampleFilter::Nearest`].
///
/// # Example
///
/// ```
/// use pixel_pipeline::ResampleFilter;
///
/// assert_eq!(ResampleFilter::from_name("lanczos"), ResampleFilter::Lanczos);
/// assert_eq!(ResampleFilter::from_name("Lanczos"), ResampleFilter::Nearest);
/// assert_eq!(ResampleFilter::from_name("xyz"), ResampleFilter::Nearest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResampleFilter {
    /// Nearest-neighbor: each output pixel copies the source pixel under its
    /// center. Keeps hard pixel edges.
    #[default]
    Nearest,
    /// Box (area averaging).
    Box,
    /// Bilinear (triangle kernel).
    Bilinear,
    /// Hamming-windowed sinc, support 1.
    Hamming,
    /// Bicubic (Keys, a = -0.5), support 2.
    Bicubic,
    /// Lanczos-windowed sinc, a = 3.
    Lanczos,
}

impl ResampleFilter {
    /// Every filter, in declaration order.
    pub const ALL: [ResampleFilter; 6] = [
        ResampleFilter::Nearest,
        ResampleFilter::Box,
        ResampleFilter::Bilinear,
        ResampleFilter::Hamming,
        ResampleFilter::Bicubic,
        ResampleFilter::Lanczos,
    ];

    /// Resolve a filter from its exact lowercase name. Anything else,
    /// including case or whitespace variants, resolves to `Nearest`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "box" => ResampleFilter::Box,
            "bilinear" => ResampleFilter::Bilinear,
            "hamming" => ResampleFilter::Hamming,
            "bicubic" => ResampleFilter::Bicubic,
            "lanczos" => ResampleFilter::Lanczos,
            _ => ResampleFilter::Nearest,
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Box => "box",
            ResampleFilter::Bilinear => "bilinear",
            ResampleFilter::Hamming => "hamming",
            ResampleFilter::Bicubic => "bicubic",
            ResampleFilter::Lanczos => "lanczos",
        }
    }

    /// Kernel radius at scale 1. `Nearest` has no convolution kernel.
    pub(crate) fn support(self) -> f64 {
        match self {
            ResampleFilter::Nearest => 0.0,
            ResampleFilter::Box => 0.5,
            ResampleFilter::Bilinear => 1.0,
            ResampleFilter::Hamming => 1.0,
            ResampleFilter::Bicubic => 2.0,
            ResampleFilter::Lanczos => 3.0,
        }
    }

    /// Kernel weight at distance `x` from the sample center.
    pub(crate) fn weight(self, x: f64) -> f64 {
        match self {
            ResampleFilter::Nearest => 0.0,
            ResampleFilter::Box => {
                if x > -0.5 && x <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ResampleFilter::Bilinear => {
                let x = x.abs();
                if x < 1.0 {
                    1.0 - x
                } else {
                    0.0
                }
            }
            ResampleFilter::Hamming => {
                let x = x.abs();
                if x == 0.0 {
                    1.0
                } else if x >= 1.0 {
                    0.0
                } else {
                    let px = x * PI;
                    px.sin() / px * (0.54 + 0.46 * px.cos())
                }
            }
            ResampleFilter::Bicubic => {
                const A: f64 = -0.5;
                let x = x.abs();
                if x < 1.0 {
                    ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
                } else if x < 2.0 {
                    (((x - 5.0) * x + 8.0) * x - 4.0) * A
                } else {
                    0.0
                }
            }
            ResampleFilter::Lanczos => {
                if x.abs() < 3.0 {
                    sinc(x) * sinc(x / 3.0)
                } else {
                    0.0
                }
            }
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = x * PI;
        px.sin() / px
    }
}

impl From<&str> for ResampleFilter {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
