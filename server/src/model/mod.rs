//! Model access module
//!
//! This module provides:
//! - `ModelGateway` trait abstracting the two-stage inference backend
//! - `OnnxModelGateway` running the exported graphs with ONNX Runtime
//! - `DummyModelGateway` fallback used when model artifacts are missing

use std::sync::Arc;

use tracing::warn;

use crate::config::ModelConfig;

mod dummy;
mod gateway;
mod onnx;
mod types;

pub use dummy::DummyModelGateway;
pub use gateway::ModelGateway;
pub use onnx::OnnxModelGateway;
pub use types::{ClassScores, INPUT_SIZE, ModelError};

/// Load the configured models, falling back to the dummy gateway if the
/// artifacts are missing or fail to load. Startup never fails on model
/// problems; the health endpoint reports `models_loaded: false` instead.
pub fn load_gateway(config: &ModelConfig) -> Arc<dyn ModelGateway> {
    match OnnxModelGateway::load(config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            warn!("Model artifacts unavailable ({e}), using dummy models");
            Arc::new(DummyModelGateway::new())
        }
    }
}
