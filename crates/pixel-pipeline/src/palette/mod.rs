//! Palette types and utilities
//!
//! This module provides the fixed target [`Palette`] and the error types for
//! parsing and validating it.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
