//! HTTP route handlers for the prediction API

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::model::ModelGateway;
use crate::pipeline;

use super::encode::{encode_mask_png_base64, encode_png_base64};
use super::types::{ApiError, HealthResponse, PredictResponse};

/// Accepted upload file extensions
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// Application state containing the model gateway
#[derive(Clone)]
pub struct ApiAppState {
    pub gateway: Arc<dyn ModelGateway>,
    pub started_at: Instant,
}

impl ApiAppState {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            started_at: Instant::now(),
        }
    }
}

fn validate_extension(filename: &str) -> Result<(), ApiError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedExtension(filename.to_string()))
    }
}

/// POST /predict - Run the two-stage pipeline on an uploaded image
pub async fn predict(
    State(state): State<ApiAppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or(ApiError::MissingFile)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or(ApiError::MissingFile)?;
    validate_extension(&filename)?;

    let original = pipeline::prep::decode_upload(&data).map_err(|e| {
        warn!("Failed to decode upload {}: {}", filename, e);
        ApiError::from(e)
    })?;

    let prediction = pipeline::predict_tumor(state.gateway.as_ref(), original)
        .await
        .map_err(|e| {
            warn!("Prediction failed for {}: {}", filename, e);
            ApiError::from(e)
        })?;

    info!(
        has_tumor = prediction.has_tumor,
        tumor_probability = prediction.tumor_probability,
        "Prediction complete for {}",
        filename
    );

    Ok(Json(PredictResponse {
        has_tumor: prediction.has_tumor,
        tumor_probability: prediction.tumor_probability,
        original_image: encode_png_base64(&prediction.original)?,
        mask_image: encode_mask_png_base64(&prediction.mask)?,
        overlay_image: encode_png_base64(&prediction.overlay)?,
    }))
}

/// GET /health - Report service and model status
pub async fn health(State(state): State<ApiAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        models_loaded: state.gateway.is_loaded(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// Build the prediction API routes
pub fn api_routes(state: ApiAppState, max_upload_size: usize) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_size))
        .with_state(state)
}
