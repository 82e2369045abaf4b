//! Dummy model gateway
//!
//! Substituted for the real models when artifact files are missing. The
//! service stays up and answers with deterministic constant outputs;
//! `models_loaded` in the health response is the only signal that predictions
//! are meaningless.

use async_trait::async_trait;
use ndarray::{Array2, Array4};

use super::gateway::ModelGateway;
use super::types::{ClassScores, INPUT_SIZE, ModelError};

/// Gateway returning constant outputs regardless of input
#[derive(Debug, Clone)]
pub struct DummyModelGateway {
    scores: ClassScores,
    mask_fill: f32,
}

impl DummyModelGateway {
    /// Default dummy: an exact class tie (argmax picks index 0, so no tumor)
    /// and an empty probability map.
    pub fn new() -> Self {
        Self {
            scores: ClassScores([0.5, 0.5]),
            mask_fill: 0.0,
        }
    }

    /// Dummy that always reports a tumor with the given probability
    pub fn with_tumor(probability: f32) -> Self {
        Self {
            scores: ClassScores([1.0 - probability, probability]),
            mask_fill: 0.0,
        }
    }

    /// Set the constant value of every probability-map cell
    pub fn with_mask_fill(mut self, fill: f32) -> Self {
        self.mask_fill = fill;
        self
    }
}

impl Default for DummyModelGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for DummyModelGateway {
    async fn classify(&self, _input: Array4<f32>) -> Result<ClassScores, ModelError> {
        Ok(self.scores)
    }

    async fn segment(&self, _input: Array4<f32>) -> Result<Array2<f32>, ModelError> {
        let side = INPUT_SIZE as usize;
        Ok(Array2::from_elem((side, side), self.mask_fill))
    }

    fn is_loaded(&self) -> bool {
        false
    }
}
