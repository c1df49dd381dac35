//! Pixelpal
//!
//! Turns photos into fixed-palette pixel art. The image pipeline lives in the
//! `pixel-pipeline` crate; this crate adds codecs, configuration, the HTTP
//! API and the command line. Modules are public for integration testing.

pub mod api;
pub mod assets;
pub mod codec;
pub mod error;
pub mod models;
pub mod palette_import;
pub mod server;
pub mod services;
