//! Color quantization.
//!
//! [`quantize()`] reduces an image to at most `levels` distinct colors using
//! a deterministic weighted median cut:
//!
//! 1. Build a histogram of the distinct RGB colors (sorted, so iteration
//!    order never depends on hashing).
//! 2. Starting from one box holding every color, repeatedly split the box
//!    with the widest channel range at the weighted median of that channel.
//! 3. Replace every color by the weighted mean of its box.
//!
//! The same `(image, levels)` pair always produces the same output, which
//! keeps the pipeline's two-stage quantize/re-quantize reproducible.

mod median_cut;

use std::collections::HashMap;

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::image::{ColorMode, PixelImage};

use median_cut::{median_cut, Histogram};

/// Reduce `image` to at most `levels` distinct colors.
///
/// The result is always RGB; alpha is dropped. An image that already has
/// `levels` colors or fewer comes back with its colors untouched.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `levels` is zero.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{quantize, PixelImage, Rgb};
///
/// let pixels: Vec<Rgb> = (0..=255).map(|v| Rgb::new(v, v, v)).collect();
/// let image = PixelImage::from_rgb(16, 16, &pixels).unwrap();
///
/// let reduced = quantize(&image, 4).unwrap();
/// assert!(reduced.distinct_colors() <= 4);
/// ```
pub fn quantize(image: &PixelImage, levels: usize) -> Result<PixelImage, PipelineError> {
    if levels == 0 {
        return Err(PipelineError::invalid("levels", levels));
    }

    let histogram = Histogram::from_image(image);
    if histogram.len() <= levels {
        return Ok(image.clone().into_rgb());
    }

    let boxes = median_cut(histogram, levels);

    let mut lookup: HashMap<Rgb, Rgb> = HashMap::new();
    for color_box in &boxes {
        let mean = color_box.mean();
        for entry in color_box.entries() {
            lookup.insert(entry.color, mean);
        }
    }

    let data: Vec<u8> = image
        .pixels()
        .flat_map(|px| lookup[&Rgb::from_slice(px)].to_bytes())
        .collect();

    PixelImage::new(image.width(), image.height(), ColorMode::Rgb, data)
}
