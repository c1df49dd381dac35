use std::io::Cursor;

use image::io::Reader as ImageReader;
use image::ImageError;
use pixel_pipeline::{ColorMode, PixelImage};

use crate::error::ProcessError;

/// Largest accepted input, in pixels. Checked from the header before the
/// full decode.
pub const MAX_INPUT_PIXELS: u64 = 64 * 1024 * 1024;

/// Decode PNG, JPEG, GIF, WebP or BMP bytes.
///
/// Images with an alpha channel decode as RGBA, all others as RGB. For
/// animated formats only the first frame is used.
pub fn decode(bytes: &[u8]) -> Result<PixelImage, ProcessError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    let (width, height) = reader.into_dimensions()?;
    let pixels = width as u64 * height as u64;
    if pixels > MAX_INPUT_PIXELS {
        return Err(ProcessError::TooLarge {
            width,
            height,
            max: MAX_INPUT_PIXELS,
        });
    }

    let decoded = image::load_from_memory(bytes)?;
    let image = if decoded.color().has_alpha() {
        PixelImage::new(width, height, ColorMode::Rgba, decoded.into_rgba8().into_raw())?
    } else {
        PixelImage::new(width, height, ColorMode::Rgb, decoded.into_rgb8().into_raw())?
    };

    tracing::debug!(width, height, alpha = image.has_alpha(), "Decoded input image");
    Ok(image)
}
