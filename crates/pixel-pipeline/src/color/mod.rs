//! Color types
//!
//! All pipeline color math happens on 8-bit sRGB values exactly as they are
//! stored in the image buffer; no gamma decoding is applied.
//!
//! - [`Rgb`]: opaque color, the unit of palette matching
//! - [`Rgba`]: color with alpha, used for padding fills
//! - [`Hsv`]: hue/saturation/value view used for color reports
//!
//! # Example
//!
//! ```
//! use pixel_pipeline::Rgb;
//!
//! let red: Rgb = "#FF0000".parse().unwrap();
//! assert_eq!(red, Rgb::new(255, 0, 0));
//! assert_eq!(red.to_hex(), "#ff0000");
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv;
pub use rgb::{Rgb, Rgba};
