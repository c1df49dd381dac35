//! Test fixtures: images and multipart bodies.

use pixel_pipeline::{PixelImage, Rgb, Rgba};
use pixelpal::codec::encode_png;

/// Boundary used by [`MultipartBody`]
pub const BOUNDARY: &str = "pixelpal-test-boundary";

/// Minimal multipart/form-data builder
#[derive(Default)]
pub struct MultipartBody {
    data: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part
    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.data.extend_from_slice(bytes);
        self.data.extend_from_slice(b"\r\n");
        self
    }

    /// Add a text part
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.data.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.data
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.data
    }
}

/// Solid-color PNG
pub fn solid_png(width: u32, height: u32, color: Rgb) -> Vec<u8> {
    let image = PixelImage::filled(width, height, color).unwrap();
    encode_png(&image).unwrap()
}

/// Smooth RGB gradient PNG, many distinct colors
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let (wx, hy) = ((width - 1).max(1), (height - 1).max(1));
    let pixels: Vec<Rgb> = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Rgb::new(
                    (x * 255 / wx) as u8,
                    (y * 255 / hy) as u8,
                    ((x + y) % 256) as u8,
                )
            })
        })
        .collect();
    let image = PixelImage::from_rgb(width, height, &pixels).unwrap();
    encode_png(&image).unwrap()
}

/// Semi-transparent PNG
pub fn translucent_png(width: u32, height: u32) -> Vec<u8> {
    let image = PixelImage::filled_rgba(width, height, Rgba::new(20, 120, 220, 100)).unwrap();
    encode_png(&image).unwrap()
}

/// Palette used by [`small_config`]
pub const SMALL_PALETTE: [Rgb; 3] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
];

/// Inline config with a three-color palette
pub fn small_config() -> &'static str {
    "palette:\n  - \"#000000\"\n  - \"#FFFFFF\"\n  - \"#FF0000\"\npipeline:\n  output_size: 64\nserver:\n  max_pixel_size: 64\n"
}
