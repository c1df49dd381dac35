//! Owned 8-bit raster image.
//!
//! [`PixelImage`] is the value passed between pipeline stages. It owns a
//! row-major, index-addressed byte buffer with 3 (RGB) or 4 (RGBA) bytes per
//! pixel. Every stage consumes a borrowed image and returns a new one.

use std::collections::HashSet;

use crate::color::{Rgb, Rgba};
use crate::error::PipelineError;

/// Channel layout of a [`PixelImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Bytes per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

/// A width×height grid of 8-bit RGB or RGBA pixels.
///
/// # Invariants
///
/// - `width >= 1` and `height >= 1`
/// - `data.len() == width * height * mode.channels()`
///
/// # Example
///
/// ```
/// use pixel_pipeline::{ColorMode, PixelImage, Rgb};
///
/// let image = PixelImage::new(2, 1, ColorMode::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(image.rgb_at(1, 0), Rgb::new(0, 0, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    mode: ColorMode,
    data: Vec<u8>,
}

impl PixelImage {
    /// Wrap a raw pixel buffer.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidParameter`] if a dimension is zero or the
    /// buffer length does not match the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        data: Vec<u8>,
    ) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * mode.channels();
        if data.len() != expected {
            return Err(PipelineError::invalid("data length", data.len()));
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Wrap a buffer produced by a stage that already guarantees the
    /// invariants.
    pub(crate) fn from_raw(width: u32, height: u32, mode: ColorMode, data: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width as usize * height as usize * mode.channels());
        Self {
            width,
            height,
            mode,
            data,
        }
    }

    /// An RGB image where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let data = color.to_bytes().repeat(width as usize * height as usize);
        Self::new(width, height, ColorMode::Rgb, data)
    }

    /// An RGBA image where every pixel is `color`.
    pub fn filled_rgba(width: u32, height: u32, color: Rgba) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let data = color.to_bytes().repeat(width as usize * height as usize);
        Self::new(width, height, ColorMode::Rgba, data)
    }

    /// Build an RGB image from row-major colors.
    pub fn from_rgb(width: u32, height: u32, pixels: &[Rgb]) -> Result<Self, PipelineError> {
        let data = pixels.iter().flat_map(|c| c.to_bytes()).collect();
        Self::new(width, height, ColorMode::Rgb, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.mode == ColorMode::Rgba
    }

    /// Raw row-major pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let ch = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * ch;
        &self.data[idx..idx + ch]
    }

    /// Color of the pixel at `(x, y)`, alpha ignored.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_slice(self.pixel(x, y))
    }

    /// Iterate over pixels as byte slices in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }

    /// Iterate over rows as byte slices.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width as usize * self.channels())
    }

    /// Drop the alpha channel, if any.
    pub fn into_rgb(self) -> Self {
        match self.mode {
            ColorMode::Rgb => self,
            ColorMode::Rgba => {
                let data = self
                    .data
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                Self {
                    width: self.width,
                    height: self.height,
                    mode: ColorMode::Rgb,
                    data,
                }
            }
        }
    }

    /// Add an opaque alpha channel, if missing.
    pub fn into_rgba(self) -> Self {
        match self.mode {
            ColorMode::Rgba => self,
            ColorMode::Rgb => {
                let data = self
                    .data
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], 255])
                    .collect();
                Self {
                    width: self.width,
                    height: self.height,
                    mode: ColorMode::Rgba,
                    data,
                }
            }
        }
    }

    /// Number of distinct RGB colors (alpha ignored).
    pub fn distinct_colors(&self) -> usize {
        self.pixels()
            .map(Rgb::from_slice)
            .collect::<HashSet<_>>()
            .len()
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), PipelineError> {
    if width == 0 {
        return Err(PipelineError::invalid("width", 0));
    }
    if height == 0 {
        return Err(PipelineError::invalid("height", 0));
    }
    Ok(())
}
