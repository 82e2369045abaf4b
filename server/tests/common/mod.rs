//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

use std::io::Cursor;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use image::{Rgb, RgbImage};
use neuroscan_server::api::{ApiAppState, api_routes};
use neuroscan_server::model::{DummyModelGateway, ModelGateway};
use tower_http::cors::{Any, CorsLayer};

pub const MULTIPART_BOUNDARY: &str = "neuroscan-test-boundary";

/// Create a test application router around the given gateway
pub fn create_test_app(gateway: impl ModelGateway + 'static) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api_routes(ApiAppState::new(Arc::new(gateway)), 10 * 1024 * 1024).layer(cors)
}

/// Create a test application with the default (no-tumor) dummy gateway
pub fn create_default_test_app() -> Router {
    create_test_app(DummyModelGateway::new())
}

/// Build a multipart/form-data body with a single file field
pub fn multipart_upload(filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// PNG bytes for a solid-color image of the given size
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Decode a base64 PNG payload from a response back into an RGB image
pub fn decode_base64_png(encoded: &str) -> RgbImage {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    let bytes = STANDARD.decode(encoded).unwrap();
    image::load_from_memory(&bytes).unwrap().to_rgb8()
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
