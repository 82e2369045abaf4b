//! NeuroScan Server Library
//!
//! This module exports the server components for use in integration tests
//! and external tooling.

pub mod api;
pub mod config;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use api::{ApiAppState, api_routes};
pub use model::{DummyModelGateway, ModelGateway};
pub use pipeline::{Prediction, predict_tumor};
