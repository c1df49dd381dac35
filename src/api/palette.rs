use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::PixelArtService;

/// The configured target palette
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteResponse {
    /// Number of entries
    pub size: usize,
    /// Entries as lowercase `#rrggbb`, in tie-break order
    pub colors: Vec<String>,
}

/// Get the target palette
#[utoipa::path(
    get,
    path = "/api/palette",
    responses(
        (status = 200, description = "Configured palette", body = PaletteResponse),
    ),
    tag = "Processing"
)]
pub async fn handle_palette(State(service): State<Arc<PixelArtService>>) -> Json<PaletteResponse> {
    let palette = service.palette();
    Json(PaletteResponse {
        size: palette.len(),
        colors: palette.colors().iter().map(|c| c.to_hex()).collect(),
    })
}
