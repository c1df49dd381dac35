//! Palette snapping.
//!
//! Every pixel is replaced by its nearest palette entry (squared RGB
//! distance, earliest entry on ties). Rows are processed in parallel; the
//! result does not depend on the scheduling because each output pixel is a
//! pure function of its input pixel.

use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::{ColorMode, PixelImage};
use crate::palette::Palette;

/// Map every pixel of `image` to its nearest color in `palette`.
///
/// Returns an RGB image of the same size whose every pixel is a palette
/// entry. Alpha, if present, is ignored for matching and dropped.
/// Snapping an already-snapped image returns an identical image.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{snap, Palette, PixelImage, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// let image = PixelImage::filled(4, 4, Rgb::new(200, 190, 210)).unwrap();
///
/// let snapped = snap(&image, &palette);
/// assert_eq!(snapped.rgb_at(0, 0), Rgb::new(255, 255, 255));
/// ```
pub fn snap(image: &PixelImage, palette: &Palette) -> PixelImage {
    let ch = image.channels();
    let in_stride = image.width() as usize * ch;
    let out_stride = image.width() as usize * 3;

    let mut data = vec![0u8; out_stride * image.height() as usize];
    data.par_chunks_mut(out_stride)
        .zip(image.data().par_chunks(in_stride))
        .for_each(|(dst_row, src_row)| {
            for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(ch)) {
                dst.copy_from_slice(&palette.nearest(Rgb::from_slice(src)).to_bytes());
            }
        });

    PixelImage::from_raw(image.width(), image.height(), ColorMode::Rgb, data)
}
