//! Assertion helpers for tests.

use axum::http::StatusCode;
use base64::Engine;
use pixel_pipeline::{PixelImage, Rgb};
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a JSON error body with the given status and message
pub fn assert_json_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_status(response, status);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(status.as_u16() as u64));
    let error = json["error"].as_str().unwrap_or_default();
    assert!(
        error.contains(message),
        "Expected error containing {message:?}, got {error:?}"
    );
}

/// Decode the base64 PNG of a `/api/process` response
pub fn decode_result_image(json: &serde_json::Value) -> PixelImage {
    let encoded = json["image"].as_str().expect("image should be a string");
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .expect("image should be valid base64");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "image should be a PNG");
    pixelpal::codec::decode(&bytes).expect("result PNG should decode")
}

/// Assert every pixel of `image` is one of `palette`
pub fn assert_palette_only(image: &PixelImage, palette: &[Rgb]) {
    for px in image.pixels() {
        let rgb = Rgb::from_slice(px);
        assert!(palette.contains(&rgb), "{rgb:?} is not a palette color");
    }
}
