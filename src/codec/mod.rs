//! Image file decoding and PNG encoding.

mod decode;
mod encode;

pub use decode::{decode, MAX_INPUT_PIXELS};
pub use encode::encode_png;
