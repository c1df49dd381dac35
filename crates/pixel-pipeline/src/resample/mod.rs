//! Image resizing with PIL-compatible filters.
//!
//! Six filters are available through [`ResampleFilter`]. The convolution
//! filters use the same support, center and tap placement as the reference
//! resamplers found in common imaging libraries, so a given input and
//! target size always produce the same output.

mod filter;
mod resize;

pub use filter::ResampleFilter;
pub use resize::resize;
