#![allow(clippy::module_inception)]

//! pixel-pipeline: turn photos into fixed-palette pixel art
//!
//! The crate implements a short, deterministic recipe that takes an
//! arbitrary photo and produces a blocky image whose every pixel is one of
//! a fixed set of target colors.
//!
//! # Quick Start
//!
//! ```
//! use pixel_pipeline::{Palette, PixelArtPipeline, PixelImage, ResampleFilter, Rgb};
//!
//! let palette = Palette::from_hex(&["#000000", "#FF0000", "#FFFFFF"]).unwrap();
//! let pipeline = PixelArtPipeline::new(palette)
//!     .pixel_size(16)
//!     .filter(ResampleFilter::from_name("lanczos"));
//!
//! let photo = PixelImage::filled(100, 80, Rgb::new(250, 10, 10)).unwrap();
//! let art = pipeline.process(&photo).unwrap();
//!
//! assert_eq!((art.width(), art.height()), (512, 512));
//! assert_eq!(art.rgb_at(0, 0), Rgb::new(255, 0, 0));
//! ```
//!
//! # Stages
//!
//! ```text
//! input image (RGB or RGBA)
//!     |
//!     +---> [pad_to_square]    optional, off by default
//!     |
//!     v
//! quantize(128)                weighted median cut, alpha dropped
//!     |
//!     v
//! resize(pixel_size², filter)  PIL-style separable convolution
//!     |
//!     v
//! quantize(15)
//!     |
//!     v
//! snap(palette)                nearest entry, squared RGB distance
//!     |
//!     v
//! resize(512², nearest)        hard pixel edges
//! ```
//!
//! Every stage is also exported on its own: [`quantize()`], [`resize()`],
//! [`snap()`], [`pad_to_square()`]. [`used_colors()`] reports the colors of
//! a finished image with their design-editor grid positions.
//!
//! # Palette Matching
//!
//! Distances are plain squared Euclidean distances on 8-bit sRGB values.
//! When two entries are equally close the earlier one wins, so palette order
//! is part of the palette's meaning.

pub mod analysis;
pub mod color;
pub mod error;
pub mod image;
pub mod pad;
pub mod palette;
pub mod pipeline;
pub mod quantize;
pub mod resample;
pub mod snap;

#[cfg(test)]
mod domain_tests;

pub use analysis::{used_colors, DesignGridIndex, UsedColor};
pub use color::{Hsv, Rgb, Rgba};
pub use error::PipelineError;
pub use image::{ColorMode, PixelImage};
pub use pad::pad_to_square;
pub use palette::{Palette, PaletteError, ParseColorError};
pub use pipeline::{PipelineConfig, PixelArtPipeline};
pub use quantize::quantize;
pub use resample::{resize, ResampleFilter};
pub use snap::snap;
