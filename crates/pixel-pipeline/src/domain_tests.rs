//! End-to-end regression tests for the pixel-art recipe.
//!
//! Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::color::Rgb;
    use crate::image::PixelImage;
    use crate::palette::Palette;
    use crate::pipeline::{PipelineConfig, PixelArtPipeline};
    use crate::resample::{resize, ResampleFilter};
    use crate::snap::snap;

    fn photo(width: u32, height: u32) -> PixelImage {
        let pixels: Vec<Rgb> = (0..width * height)
            .map(|i| {
                let x = i % width;
                let y = i / width;
                Rgb::new(
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    ((x * 3 + y * 5) % 256) as u8,
                )
            })
            .collect();
        PixelImage::from_rgb(width, height, &pixels).unwrap()
    }

    fn acnh_like() -> Palette {
        Palette::from_hex(&[
            "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF",
            "#00FFFF", "#808080", "#804000", "#FF8000", "#008040",
        ])
        .unwrap()
    }

    /// If this breaks, a solid photo no longer survives the recipe intact:
    /// one of the quantize, resize or snap stages is shifting colors.
    #[test]
    fn test_solid_red_end_to_end() {
        let palette = Palette::new(vec![
            Rgb::new(0, 0, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(255, 255, 255),
        ])
        .unwrap();
        let image = PixelImage::filled(64, 64, Rgb::new(255, 0, 0)).unwrap();
        let pipeline = PixelArtPipeline::new(palette)
            .pixel_size(8)
            .filter(ResampleFilter::from_name("nearest"));

        let out = pipeline.process(&image).unwrap();
        assert_eq!((out.width(), out.height()), (512, 512));
        assert!(out.pixels().all(|px| px == [255, 0, 0]));
    }

    /// If this breaks, unknown filter names are no longer treated as
    /// nearest-neighbor and may error or pick a smoothing kernel.
    #[test]
    fn test_unknown_filter_matches_nearest() {
        let image = photo(50, 37);
        let unknown = resize(&image, 16, 16, ResampleFilter::from_name("xyz")).unwrap();
        let nearest = resize(&image, 16, 16, ResampleFilter::from_name("nearest")).unwrap();
        assert_eq!(unknown, nearest);
    }

    /// If this breaks, filter names are being normalized before lookup and
    /// case variants pick a smoothing kernel.
    #[test]
    fn test_case_variants_match_nearest() {
        let image = photo(50, 37);
        let nearest = resize(&image, 16, 16, ResampleFilter::Nearest).unwrap();
        for name in ["LANCZOS", "Box", " bilinear "] {
            let out = resize(&image, 16, 16, ResampleFilter::from_name(name)).unwrap();
            assert_eq!(out, nearest, "{:?}", name);
        }
    }

    /// If this breaks, a filter produces off-by-one dimensions for some
    /// scale factor.
    #[test]
    fn test_every_filter_hits_exact_size() {
        let image = photo(123, 45);
        for filter in ResampleFilter::ALL {
            for size in [1, 7, 32, 200] {
                let out = resize(&image, size, size, filter).unwrap();
                assert_eq!((out.width(), out.height()), (size, size), "{}", filter);
            }
        }
    }

    /// If this breaks, the output contains colors that are not in the
    /// palette, or block edges are no longer hard.
    #[test]
    fn test_output_uses_only_palette_colors() {
        let palette = acnh_like();
        for filter in ResampleFilter::ALL {
            let pipeline = PixelArtPipeline::new(palette.clone())
                .pixel_size(16)
                .filter(filter);
            let out = pipeline.process(&photo(90, 60)).unwrap();

            assert!(
                out.pixels().all(|px| palette.contains(Rgb::from_slice(px))),
                "{} produced off-palette colors",
                filter
            );
            // 512 / 16 = 32 pixel blocks
            for y in (0..512).step_by(32) {
                for x in (0..512).step_by(32) {
                    assert_eq!(out.rgb_at(x, y), out.rgb_at(x + 31, y + 31));
                }
            }
        }
    }

    /// If this breaks, snapping is not a projection onto the palette.
    #[test]
    fn test_snap_idempotent_on_photo() {
        let palette = acnh_like();
        let once = snap(&photo(40, 40), &palette);
        assert_eq!(snap(&once, &palette), once);
    }

    /// If this breaks, the recipe has become non-deterministic (for example
    /// through hash iteration order in the quantizer).
    #[test]
    fn test_recipe_is_deterministic() {
        let pipeline = PixelArtPipeline::with_config(
            acnh_like(),
            PipelineConfig::new().pixel_size(24).filter(ResampleFilter::Bicubic),
        );
        let image = photo(77, 51);
        assert_eq!(
            pipeline.process(&image).unwrap(),
            pipeline.process(&image).unwrap()
        );
    }

    /// If this breaks, the second quantize no longer bounds the grid colors.
    #[test]
    fn test_at_most_second_level_colors() {
        let palette = Palette::new((0..=255u8).map(|v| Rgb::new(v, v, 255 - v)).collect()).unwrap();
        let pipeline = PixelArtPipeline::new(palette).pixel_size(32);
        let out = pipeline.process(&photo(64, 64)).unwrap();
        assert!(out.distinct_colors() <= 15);
    }
}
