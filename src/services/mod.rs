pub mod pixel_art;

pub use pixel_art::{PixelArtService, ProcessOptions, ProcessOutput};
