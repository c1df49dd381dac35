//! Square padding.

use crate::color::Rgba;
use crate::image::{ColorMode, PixelImage};

/// Center `image` on a square RGBA canvas filled with `fill`.
///
/// The canvas side is `max(width, height)`. The offset is
/// `((side - width) / 2, (side - height) / 2)` with integer division, so an
/// odd remainder leaves the extra row or column on the bottom/right.
/// An already-square image is returned unchanged apart from gaining an
/// opaque alpha channel.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{pad_to_square, PixelImage, Rgb, Rgba};
///
/// let image = PixelImage::filled(4, 2, Rgb::new(9, 9, 9)).unwrap();
/// let square = pad_to_square(&image, Rgba::TRANSPARENT);
/// assert_eq!((square.width(), square.height()), (4, 4));
/// assert_eq!(square.pixel(0, 0), &[0, 0, 0, 0]);
/// assert_eq!(square.pixel(0, 1), &[9, 9, 9, 255]);
/// ```
pub fn pad_to_square(image: &PixelImage, fill: Rgba) -> PixelImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let side = w.max(h);
    let left = (side - w) / 2;
    let top = (side - h) / 2;

    let src = image.clone().into_rgba();
    let mut data = fill.to_bytes().repeat(side * side);
    for (y, row) in src.rows().enumerate() {
        let start = ((top + y) * side + left) * 4;
        data[start..start + w * 4].copy_from_slice(row);
    }

    PixelImage::from_raw(side as u32, side as u32, ColorMode::Rgba, data)
}
