//! ModelGateway trait definition

use async_trait::async_trait;
use ndarray::{Array2, Array4};

use super::types::{ClassScores, ModelError};

/// Trait for the two-stage inference backend (ONNX sessions or dummy fallback)
///
/// Inputs are normalized image batches of shape [1, 256, 256, 3] (NHWC).
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Run the classification model, returning tumor/no-tumor class scores
    async fn classify(&self, input: Array4<f32>) -> Result<ClassScores, ModelError>;

    /// Run the segmentation model, returning a 256x256 probability map
    /// (squeezed from the model's [1, 256, 256, 1] output). Values may be raw
    /// logits depending on the exported model; the pipeline normalizes them.
    async fn segment(&self, input: Array4<f32>) -> Result<Array2<f32>, ModelError>;

    /// Whether real model artifacts are loaded (false for the dummy fallback)
    fn is_loaded(&self) -> bool;
}
