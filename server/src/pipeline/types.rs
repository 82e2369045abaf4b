//! Pipeline types, fixed contract constants, and error definitions

use image::{GrayImage, RgbImage};
use thiserror::Error;

use crate::model::ModelError;

/// Probability-map threshold for mask binarization. Empirical constant carried
/// over from the trained model's evaluation; values >= this are tumor pixels.
pub const MASK_THRESHOLD: f32 = 0.3;

/// Blend weight for the red tumor tint in the overlay composite
pub const OVERLAY_ALPHA: f32 = 0.7;

/// Epsilon added to the per-image standard deviation during normalization
pub const NORM_EPSILON: f32 = 1e-7;

/// Errors that can occur while running the prediction pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not process image: {0}")]
    InvalidImage(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Result of running the full two-stage pipeline on one image
pub struct Prediction {
    /// Whether the classifier's argmax landed on the tumor class
    pub has_tumor: bool,
    /// Probability the classifier assigned to the tumor class
    pub tumor_probability: f32,
    /// The 256x256 display copy of the uploaded image
    pub original: RgbImage,
    /// Cleaned binary mask, pixels 0 or 255 (all-zero when no tumor)
    pub mask: GrayImage,
    /// Original with a translucent red tint over mask pixels
    pub overlay: RgbImage,
}
