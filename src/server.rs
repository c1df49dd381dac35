//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, ServerSettings};
use crate::services::PixelArtService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PixelArtService>,
    pub settings: Arc<ServerSettings>,
}

/// Create application state from an asset loader.
///
/// Fails if the configuration cannot be read or its palette is unusable.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader)?;
    create_app_state_from_config(&config)
}

/// Create application state from an already loaded configuration.
pub fn create_app_state_from_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = PixelArtService::from_config(config)
        .map_err(|e| anyhow::anyhow!("Failed to create pixel art service: {e}"))?;

    tracing::info!(
        palette = service.palette().len(),
        pixel_size = service.config().pixel_size,
        "Pipeline ready"
    );

    Ok(AppState {
        service: Arc::new(service),
        settings: Arc::new(config.server.clone()),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/api/process", post(handle_process))
        .route("/api/palette", get(handle_palette))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS from the configured origins. `"*"` anywhere in the list allows any
/// origin; an empty list allows none.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %o, %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<axum::Json<api::ProcessResponse>, ApiError> {
    api::handle_process(State(state.service), State(state.settings), multipart).await
}

async fn handle_palette(State(state): State<AppState>) -> axum::Json<api::PaletteResponse> {
    api::handle_palette(State(state.service)).await
}
