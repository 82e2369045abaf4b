//! HTTP API module
//!
//! This module provides:
//! - `api_routes` building the `/predict` and `/health` routes
//! - `encode` helpers turning pipeline images into base64 PNG payloads
//! - typed API errors translated to status codes at the boundary

mod encode;
pub mod routes;
mod types;

pub use routes::{ApiAppState, api_routes};
pub use types::{ApiError, ErrorResponse, HealthResponse, PredictResponse};
