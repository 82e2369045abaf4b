//! API types and error definitions

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Errors surfaced by the HTTP API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("File must be an image (PNG, JPG, TIFF), got: {0}")]
    UnsupportedExtension(String),

    #[error("Could not process image: {0}")]
    InvalidUpload(String),

    #[error("Error processing image: {0}")]
    Processing(String),

    #[error("Failed to encode response image: {0}")]
    Encoding(String),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidImage(msg) => ApiError::InvalidUpload(msg),
            PipelineError::Model(e) => ApiError::Processing(e.to_string()),
        }
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "missing_file",
            ApiError::UnsupportedExtension(_) => "unsupported_extension",
            ApiError::InvalidUpload(_) => "invalid_upload",
            ApiError::Processing(_) => "processing_error",
            ApiError::Encoding(_) => "encoding_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::UnsupportedExtension(_) | ApiError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Processing(_) | ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body with a stable machine-readable code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Response for POST /predict
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub has_tumor: bool,
    pub tumor_probability: f32,
    /// Base64-encoded PNG of the 256x256 display copy
    pub original_image: String,
    /// Base64-encoded PNG of the cleaned binary mask (expanded to RGB)
    pub mask_image: String,
    /// Base64-encoded PNG of the red-tinted overlay
    pub overlay_image: String,
}

/// Response for GET /health
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnsupportedExtension("exe".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidUpload("bad bytes".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Processing("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_error_conversion() {
        let api: ApiError = PipelineError::InvalidImage("truncated".into()).into();
        assert!(matches!(api, ApiError::InvalidUpload(_)));
        assert_eq!(api.code(), "invalid_upload");
    }
}
