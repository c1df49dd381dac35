use rayon::prelude::*;

use super::filter::ResampleFilter;
use crate::error::PipelineError;
use crate::image::PixelImage;

/// Resize `image` to exactly `width`×`height` pixels.
///
/// `Nearest` copies the source pixel under each output pixel center.
/// Every other filter runs a separable convolution (horizontal pass, then
/// vertical pass). When downscaling, the kernel is widened by the scale
/// factor so every source pixel contributes. A pass is skipped when that
/// dimension is unchanged.
///
/// The channel layout of the input is preserved.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `width` or `height` is zero.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{resize, PixelImage, ResampleFilter, Rgb};
///
/// let image = PixelImage::filled(64, 48, Rgb::new(10, 20, 30)).unwrap();
/// let small = resize(&image, 8, 6, ResampleFilter::Lanczos).unwrap();
/// assert_eq!((small.width(), small.height()), (8, 6));
/// assert_eq!(small.rgb_at(3, 3), Rgb::new(10, 20, 30));
/// ```
pub fn resize(
    image: &PixelImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<PixelImage, PipelineError> {
    if width == 0 {
        return Err(PipelineError::invalid("width", 0));
    }
    if height == 0 {
        return Err(PipelineError::invalid("height", 0));
    }
    if (width, height) == (image.width(), image.height()) {
        return Ok(image.clone());
    }

    let data = match filter {
        ResampleFilter::Nearest => resize_nearest(image, width, height),
        _ => resize_convolve(image, width, height, filter),
    };
    PixelImage::new(width, height, image.mode(), data)
}

/// Source index whose cell contains the center of output cell `i`.
fn nearest_index(i: u32, in_size: u32, out_size: u32) -> usize {
    let src = ((i as f64 + 0.5) * in_size as f64 / out_size as f64).floor() as usize;
    src.min(in_size as usize - 1)
}

fn resize_nearest(image: &PixelImage, width: u32, height: u32) -> Vec<u8> {
    let ch = image.channels();
    let xs: Vec<usize> = (0..width)
        .map(|x| nearest_index(x, image.width(), width))
        .collect();
    let in_stride = image.width() as usize * ch;
    let out_stride = width as usize * ch;

    let mut out = vec![0u8; out_stride * height as usize];
    out.par_chunks_mut(out_stride)
        .enumerate()
        .for_each(|(y, row)| {
            let sy = nearest_index(y as u32, image.height(), height);
            let src_row = &image.data()[sy * in_stride..(sy + 1) * in_stride];
            for (dst, &sx) in row.chunks_exact_mut(ch).zip(&xs) {
                dst.copy_from_slice(&src_row[sx * ch..(sx + 1) * ch]);
            }
        });
    out
}

/// Normalized kernel taps for one output sample.
struct Taps {
    start: usize,
    weights: Vec<f64>,
}

fn compute_taps(in_size: u32, out_size: u32, filter: ResampleFilter) -> Vec<Taps> {
    let scale = in_size as f64 / out_size as f64;
    let filterscale = scale.max(1.0);
    let support = filter.support() * filterscale;

    (0..out_size)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale;
            let start = (center - support + 0.5).floor().max(0.0) as usize;
            let end = ((center + support + 0.5).floor() as usize).min(in_size as usize);

            let mut weights: Vec<f64> = (start..end)
                .map(|x| filter.weight((x as f64 - center + 0.5) / filterscale))
                .collect();
            let total: f64 = weights.iter().sum();
            if total != 0.0 {
                for w in &mut weights {
                    *w /= total;
                }
            }
            Taps { start, weights }
        })
        .collect()
}

#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn resize_convolve(image: &PixelImage, width: u32, height: u32, filter: ResampleFilter) -> Vec<u8> {
    let ch = image.channels();
    let (mut w, h) = (image.width(), image.height());
    let mut data = image.data().to_vec();

    if width != w {
        data = horizontal_pass(&data, w as usize, ch, width, filter);
        w = width;
    }
    if height != h {
        data = vertical_pass(&data, w as usize, h, ch, height, filter);
    }
    data
}

fn horizontal_pass(
    src: &[u8],
    in_width: usize,
    ch: usize,
    out_width: u32,
    filter: ResampleFilter,
) -> Vec<u8> {
    let taps = compute_taps(in_width as u32, out_width, filter);
    let in_stride = in_width * ch;
    let out_stride = out_width as usize * ch;
    let rows = src.len() / in_stride;

    let mut out = vec![0u8; out_stride * rows];
    out.par_chunks_mut(out_stride)
        .zip(src.par_chunks(in_stride))
        .for_each(|(dst_row, src_row)| {
            for (dst, tap) in dst_row.chunks_exact_mut(ch).zip(&taps) {
                for (c, value) in dst.iter_mut().enumerate() {
                    let acc: f64 = tap
                        .weights
                        .iter()
                        .enumerate()
                        .map(|(j, w)| src_row[(tap.start + j) * ch + c] as f64 * w)
                        .sum();
                    *value = to_u8(acc);
                }
            }
        });
    out
}

fn vertical_pass(
    src: &[u8],
    width: usize,
    in_height: u32,
    ch: usize,
    out_height: u32,
    filter: ResampleFilter,
) -> Vec<u8> {
    let taps = compute_taps(in_height, out_height, filter);
    let stride = width * ch;

    let mut out = vec![0u8; stride * out_height as usize];
    out.par_chunks_mut(stride)
        .zip(taps.par_iter())
        .for_each(|(dst_row, tap)| {
            for (i, value) in dst_row.iter_mut().enumerate() {
                let acc: f64 = tap
                    .weights
                    .iter()
                    .enumerate()
                    .map(|(j, w)| src[(tap.start + j) * stride + i] as f64 * w)
                    .sum();
                *value = to_u8(acc);
            }
        });
    out
}
