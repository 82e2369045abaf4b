//! Deterministic prediction pipeline
//!
//! This module provides:
//! - `prep` for upload decoding and model-input normalization
//! - `morphology` for binary mask cleanup (opening + closing)
//! - `overlay` for red-tint compositing
//! - `predict_tumor` orchestrating the two-stage decision

mod morphology;
mod overlay;
mod predict;
pub mod prep;
mod types;

pub use predict::predict_tumor;
pub use types::{MASK_THRESHOLD, NORM_EPSILON, OVERLAY_ALPHA, Prediction, PipelineError};
