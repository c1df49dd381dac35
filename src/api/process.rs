use axum::extract::{Multipart, State};
use axum::response::Json;
use base64::Engine;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ServerSettings;
use crate::services::{PixelArtService, ProcessOptions, ProcessOutput};

/// Multipart form accepted by `/api/process`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProcessForm {
    /// Image file (PNG, JPEG, GIF, WebP or BMP)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Side of the pixel grid (default from config, e.g. 32)
    pub pixel_size: Option<u32>,
    /// Downscale filter: nearest, box, bilinear, hamming, bicubic, lanczos.
    /// Unknown names mean nearest.
    pub resample: Option<String>,
}

/// Position on the design editor's color grid
#[derive(Debug, Serialize, ToSchema)]
pub struct GridPosition {
    /// Hue step, 0..=29
    pub hue: u8,
    /// Saturation step, 0..=14
    pub saturation: u8,
    /// Value step, 0..=14
    pub value: u8,
}

/// One color used by the result
#[derive(Debug, Serialize, ToSchema)]
pub struct ColorInfo {
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub grid: GridPosition,
}

/// Successful processing result
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    /// Base64-encoded PNG
    pub image: String,
    pub width: u32,
    pub height: u32,
    /// Colors of the result in first-appearance order
    pub colors: Vec<ColorInfo>,
}

impl From<ProcessOutput> for ProcessResponse {
    fn from(out: ProcessOutput) -> Self {
        let colors = out
            .colors
            .into_iter()
            .map(|c| ColorInfo {
                hex: c.hex,
                r: c.rgb.r,
                g: c.rgb.g,
                b: c.rgb.b,
                grid: GridPosition {
                    hue: c.grid.hue,
                    saturation: c.grid.saturation,
                    value: c.grid.value,
                },
            })
            .collect();

        Self {
            image: base64::engine::general_purpose::STANDARD.encode(&out.png),
            width: out.width,
            height: out.height,
            colors,
        }
    }
}

/// Turn an uploaded photo into palette pixel art
///
/// Runs quantize, downscale, re-quantize, palette snap and nearest-neighbor
/// upscale, and returns the PNG as base64 together with the colors it uses.
#[utoipa::path(
    post,
    path = "/api/process",
    request_body(content = ProcessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Pixel art generated", body = ProcessResponse),
        (status = 400, description = "Missing file, bad form value or unreadable image"),
        (status = 422, description = "Pipeline rejected a parameter"),
    ),
    tag = "Processing"
)]
pub async fn handle_process(
    State(service): State<Arc<PixelArtService>>,
    State(settings): State<Arc<ServerSettings>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut pixel_size: Option<String> = None;
    let mut resample: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                file = Some(data.to_vec());
            }
            Some("pixel_size") => {
                pixel_size = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.body_text()))?,
                );
            }
            Some("resample") => {
                resample = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.body_text()))?,
                );
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    let file = file.ok_or(ApiError::MissingField("file"))?;
    let pixel_size = parse_pixel_size(pixel_size.as_deref(), &settings)?;

    tracing::info!(
        upload_bytes = file.len(),
        pixel_size = ?pixel_size,
        resample = ?resample,
        "Processing upload"
    );

    let options = ProcessOptions {
        pixel_size,
        filter: resample,
        pad_to_square: None,
    };
    let output = service.process(file, options).await?;

    Ok(Json(ProcessResponse::from(output)))
}

/// Validate the optional `pixel_size` form value. Blank means default.
fn parse_pixel_size(
    value: Option<&str>,
    settings: &ServerSettings,
) -> Result<Option<u32>, ApiError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let size: u32 = raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("pixel_size must be an integer, got {raw:?}")))?;
    settings
        .check_pixel_size(size)
        .map(Some)
        .map_err(ApiError::BadRequest)
}
