use std::collections::HashMap;
use std::io::Cursor;

use pixel_pipeline::PixelImage;

use crate::error::ProcessError;

/// Encode an image as an optimized PNG.
///
/// Images with at most 256 distinct colors are written as indexed PNG
/// (PLTE, plus tRNS when any color is translucent) at the smallest bit depth
/// that fits; anything else is written as 8-bit truecolor. The result is
/// then recompressed losslessly with oxipng.
pub fn encode_png(image: &PixelImage) -> Result<Vec<u8>, ProcessError> {
    let (color_type, bit_depth, plte, trns, packed) = match index_colors(image) {
        Some((colors, indices)) => {
            let (depth, bits) = match colors.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
            let trns = if image.has_alpha() && colors.iter().any(|c| c[3] != 255) {
                Some(colors.iter().map(|c| c[3]).collect::<Vec<u8>>())
            } else {
                None
            };
            let packed = if bits == 8 {
                indices
            } else {
                pack_nbits(&indices, image.width(), bits)
            };
            (png::ColorType::Indexed, depth, Some(plte), trns, packed)
        }
        None => {
            let color_type = if image.has_alpha() {
                png::ColorType::Rgba
            } else {
                png::ColorType::Rgb
            };
            (
                color_type,
                png::BitDepth::Eight,
                None,
                None,
                image.data().to_vec(),
            )
        }
    };

    let png_bytes = write_png(
        image.width(),
        image.height(),
        color_type,
        bit_depth,
        plte.as_deref(),
        trns.as_deref(),
        &packed,
    )?;

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        bytes = optimized.len(),
        "Encoded PNG"
    );
    Ok(optimized)
}

/// Distinct RGBA colors in first-appearance order and per-pixel indices, or
/// `None` when there are more than 256 colors.
fn index_colors(image: &PixelImage) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut colors: Vec<[u8; 4]> = Vec::new();
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut indices = Vec::with_capacity(image.width() as usize * image.height() as usize);

    for px in image.pixels() {
        let key = [px[0], px[1], px[2], px.get(3).copied().unwrap_or(255)];
        let idx = match lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                if colors.len() == 256 {
                    return None;
                }
                let idx = colors.len() as u8;
                colors.push(key);
                lookup.insert(key, idx);
                idx
            }
        };
        indices.push(idx);
    }

    Some((colors, indices))
}

/// Encode packed pixel data as a PNG.
fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    trns: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, ProcessError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use pixel_pipeline::{ColorMode, Rgb, Rgba};

    #[test]
    fn test_pack_nbits_pads_rows() {
        // 3 pixels at 2 bits: 00 01 10 + 2 padding bits
        assert_eq!(pack_nbits(&[0, 1, 2], 3, 2), vec![0b0001_1000]);
        // two rows of 9 pixels at 1 bit -> 2 bytes per row
        let row = [1, 0, 0, 0, 0, 0, 0, 1, 1];
        let packed = pack_nbits(&[row, row].concat(), 9, 1);
        assert_eq!(packed, vec![0b1000_0001, 0b1000_0000, 0b1000_0001, 0b1000_0000]);
    }

    #[test]
    fn test_few_colors_use_indexed_png() {
        let pixels: Vec<Rgb> = (0..64u32)
            .map(|i| if i % 3 == 0 { Rgb::new(255, 0, 0) } else { Rgb::new(0, 0, 0) })
            .collect();
        let image = PixelImage::from_rgb(8, 8, &pixels).unwrap();

        let (colors, indices) = index_colors(&image).unwrap();
        assert_eq!(colors, vec![[255, 0, 0, 255], [0, 0, 0, 255]]);
        assert_eq!(&indices[..4], &[0, 1, 1, 0]);

        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode(&bytes).unwrap(), image);
    }

    #[test]
    fn test_fifteen_colors_decode_exactly() {
        let pixels: Vec<Rgb> = (0..30 * 7u32)
            .map(|i| Rgb::new((i % 15) as u8 * 17, 100, 200 - (i % 15) as u8))
            .collect();
        let image = PixelImage::from_rgb(30, 7, &pixels).unwrap();
        assert_eq!(decode(&encode_png(&image).unwrap()).unwrap(), image);
    }

    #[test]
    fn test_transparency_preserved() {
        let image = PixelImage::new(
            2,
            1,
            ColorMode::Rgba,
            vec![0, 0, 0, 0, 250, 10, 10, 255],
        )
        .unwrap();
        let decoded = decode(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded.mode(), ColorMode::Rgba);
        assert_eq!(decoded.pixel(0, 0)[3], 0);
        assert_eq!(decoded.pixel(1, 0), &[250, 10, 10, 255]);
    }

    #[test]
    fn test_many_colors_use_truecolor() {
        let pixels: Vec<Rgb> = (0..40 * 40u32)
            .map(|i| Rgb::new((i % 256) as u8, (i / 256) as u8, 3))
            .collect();
        let image = PixelImage::from_rgb(40, 40, &pixels).unwrap();
        assert!(image.distinct_colors() > 256);

        let bytes = encode_png(&image).unwrap();
        assert_eq!(decode(&bytes).unwrap(), image);
    }

    #[test]
    fn test_opaque_rgba_round_trips_colors() {
        let image = PixelImage::filled_rgba(4, 4, Rgba::new(9, 8, 7, 255)).unwrap();
        let decoded = decode(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded.rgb_at(3, 3), Rgb::new(9, 8, 7));
    }
}
