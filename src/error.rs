use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixel_pipeline::{PaletteError, PipelineError};
use serde_json::json;
use thiserror::Error;

/// User-facing message for uploads that are not a readable image.
pub const INVALID_IMAGE_MESSAGE: &str = "Invalid image file. Upload PNG/JPG/WEBP/GIF.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{}", INVALID_IMAGE_MESSAGE)]
    InvalidImage,

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProcessError> for ApiError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::Decode(_) => ApiError::InvalidImage,
            ProcessError::TooLarge { .. } => ApiError::BadRequest(e.to_string()),
            ProcessError::Pipeline(e) => ApiError::Pipeline(e),
            ProcessError::Encode(_) | ProcessError::Task(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Image too large: {width}x{height} (max {max} pixels)")]
    TooLarge { width: u32, height: u32, max: u64 },

    #[error("Processing task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read palette source: {0}")]
    Read(#[from] std::io::Error),

    #[error("Could not find column '{0}'")]
    MissingColumn(&'static str),

    #[error("Line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::MissingField(_) | ApiError::InvalidImage => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Pipeline(PipelineError::InvalidParameter { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Pipeline(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_missing_field() {
        let error = ApiError::MissingField("file");
        assert_eq!(error.to_string(), "Missing required field: file");
    }

    #[test]
    fn test_api_error_invalid_image_message() {
        assert_eq!(
            ApiError::InvalidImage.to_string(),
            "Invalid image file. Upload PNG/JPG/WEBP/GIF."
        );
    }

    #[test]
    fn test_process_error_too_large() {
        let error = ProcessError::TooLarge {
            width: 20_000,
            height: 10_000,
            max: 100_000_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 20000x10000 (max 100000000 pixels)"
        );
    }

    #[test]
    fn test_config_error_palette() {
        let error = ConfigError::from(PaletteError::EmptyPalette);
        assert_eq!(error.to_string(), "Invalid palette: palette cannot be empty");
    }

    #[test]
    fn test_api_error_from_process_error() {
        let decode = ProcessError::Decode(image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "garbage",
        )));
        assert!(matches!(ApiError::from(decode), ApiError::InvalidImage));

        let encode = ProcessError::Encode("boom".to_string());
        match ApiError::from(encode) {
            ApiError::Internal(msg) => assert_eq!(msg, "PNG encode error: boom"),
            other => panic!("Expected Internal variant, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        use axum::response::IntoResponse;

        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::MissingField("file").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::InvalidImage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Pipeline(PipelineError::InvalidParameter {
            name: "pixel_size",
            value: 0,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response =
            ApiError::Pipeline(PipelineError::Configuration(PaletteError::EmptyPalette))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
