//! Model-related types and error definitions

use std::path::PathBuf;

use thiserror::Error;

/// Model input side length. Every image is resized to this before inference.
pub const INPUT_SIZE: u32 = 256;

/// Errors that can occur when loading or invoking models
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    ArtifactMissing(PathBuf),

    #[error("Failed to initialize inference session: {0}")]
    SessionInit(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),
}

/// Class probabilities from the classification model.
///
/// Index 0 is the no-tumor class, index 1 is the tumor class. The two values
/// sum to roughly 1.0 for a softmax-trained model, but nothing here relies on
/// that beyond the argmax decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores(pub [f32; 2]);

impl ClassScores {
    /// Whether the tumor class wins the argmax. Ties resolve to the first
    /// index, so an exact tie reads as no tumor.
    pub fn has_tumor(&self) -> bool {
        self.0[1] > self.0[0]
    }

    /// Probability assigned to the tumor class
    pub fn tumor_probability(&self) -> f32 {
        self.0[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_decision() {
        assert!(ClassScores([0.2, 0.8]).has_tumor());
        assert!(!ClassScores([0.8, 0.2]).has_tumor());
    }

    #[test]
    fn test_tie_resolves_to_no_tumor() {
        assert!(!ClassScores([0.5, 0.5]).has_tumor());
    }

    #[test]
    fn test_tumor_probability_is_second_entry() {
        let scores = ClassScores([0.3, 0.7]);
        assert_eq!(scores.tumor_probability(), 0.7);
    }
}
