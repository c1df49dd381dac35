pub mod palette;
pub mod process;

pub use palette::{handle_palette, PaletteResponse, __path_handle_palette};
pub use process::{
    handle_process, ColorInfo, GridPosition, ProcessForm, ProcessResponse, __path_handle_process,
};
