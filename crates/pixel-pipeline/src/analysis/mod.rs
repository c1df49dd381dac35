//! Used-color report.
//!
//! Lists the colors of a finished image and where each one sits on a
//! custom-design color editor grid: 30 hue steps and 15 steps each for
//! saturation and value.

use std::collections::HashSet;

use crate::color::{Hsv, Rgb};
use crate::image::PixelImage;

/// Number of hue steps on the editor grid.
pub const HUE_STEPS: u8 = 30;
/// Number of saturation and value steps on the editor grid.
pub const TONE_STEPS: u8 = 15;

/// Position of a color on the editor grid (all zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DesignGridIndex {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl From<Hsv> for DesignGridIndex {
    fn from(hsv: Hsv) -> Self {
        let step = |x: f32, width: f32, max: u8| (x / width).round().clamp(0.0, max as f32) as u8;
        let tone_width = 100.0 / TONE_STEPS as f32;
        Self {
            hue: step(hsv.h, 360.0 / HUE_STEPS as f32, HUE_STEPS - 1),
            saturation: step(hsv.s, tone_width, TONE_STEPS - 1),
            value: step(hsv.v, tone_width, TONE_STEPS - 1),
        }
    }
}

/// One distinct color of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct UsedColor {
    pub rgb: Rgb,
    /// Lowercase `#rrggbb`.
    pub hex: String,
    pub hsv: Hsv,
    pub grid: DesignGridIndex,
}

impl From<Rgb> for UsedColor {
    fn from(rgb: Rgb) -> Self {
        let hsv = Hsv::from(rgb);
        Self {
            rgb,
            hex: rgb.to_hex(),
            hsv,
            grid: DesignGridIndex::from(hsv),
        }
    }
}

/// Distinct colors of `image` in first-appearance (row-major) order.
///
/// Fully transparent pixels are skipped.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{used_colors, PixelImage, Rgb};
///
/// let image = PixelImage::from_rgb(3, 1, &[
///     Rgb::new(255, 0, 0),
///     Rgb::new(0, 0, 0),
///     Rgb::new(255, 0, 0),
/// ]).unwrap();
///
/// let colors = used_colors(&image);
/// assert_eq!(colors.len(), 2);
/// assert_eq!(colors[0].hex, "#ff0000");
/// assert_eq!(colors[0].grid.saturation, 14);
/// ```
pub fn used_colors(image: &PixelImage) -> Vec<UsedColor> {
    let alpha = image.has_alpha();
    let mut seen = HashSet::new();
    image
        .pixels()
        .filter(|px| !(alpha && px[3] == 0))
        .map(Rgb::from_slice)
        .filter(|c| seen.insert(*c))
        .map(UsedColor::from)
        .collect()
}
