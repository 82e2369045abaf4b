//! ONNX-backed model gateway
//!
//! Loads the exported classification and segmentation graphs with ONNX Runtime
//! and runs them on CPU. Sessions are created once at startup and shared
//! read-only across requests; `Session::run` takes `&mut self`, so each
//! session sits behind a mutex and the blocking call runs on the Tokio
//! blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::{Array2, Array4, ArrayD};
use ort::ep::CPU as CPUExecutionProvider;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Value;
use tracing::{debug, info};

use crate::config::ModelConfig;

use super::gateway::ModelGateway;
use super::types::{ClassScores, INPUT_SIZE, ModelError};

/// A single loaded ONNX session with its resolved I/O names
#[derive(Clone, Debug)]
struct OnnxSession {
    session: Arc<Mutex<Session>>,
    input_name: String,
}

impl OnnxSession {
    fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::ArtifactMissing(path.to_path_buf()));
        }

        info!("Loading model from {}", path.display());

        let session = Session::builder()
            .map_err(|e| ModelError::SessionInit(e.to_string()))?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(|e| ModelError::SessionInit(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::SessionInit(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| ModelError::SessionInit(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ModelError::SessionInit(e.to_string()))?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .unwrap_or_else(|| "input".to_string());

        debug!("Model loaded from {} - input: {}", path.display(), input_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
        })
    }

    /// Run the session on a [1, 256, 256, 3] batch, blocking the caller
    fn run_blocking(&self, input: Array4<f32>) -> Result<ArrayD<f32>, ModelError> {
        let input_value =
            Value::from_array(input).map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session mutex poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| ModelError::UnexpectedOutput(e.to_string()))?;

        Ok(output.to_owned())
    }

    /// Run on the Tokio blocking pool
    async fn run(&self, input: Array4<f32>) -> Result<ArrayD<f32>, ModelError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.run_blocking(input))
            .await
            .map_err(|e| ModelError::Inference(format!("inference task panicked: {e}")))?
    }
}

/// Model gateway backed by two ONNX Runtime sessions
#[derive(Debug)]
pub struct OnnxModelGateway {
    classification: OnnxSession,
    segmentation: OnnxSession,
}

impl OnnxModelGateway {
    /// Load both model artifacts from the configured paths
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let classification = OnnxSession::load(&config.classification_path())?;
        let segmentation = OnnxSession::load(&config.segmentation_path())?;

        info!("Classification and segmentation models loaded (CPU-only)");

        Ok(Self {
            classification,
            segmentation,
        })
    }
}

#[async_trait]
impl ModelGateway for OnnxModelGateway {
    async fn classify(&self, input: Array4<f32>) -> Result<ClassScores, ModelError> {
        let output = self.classification.run(input).await?;

        // Expected shape [1, 2]; accept anything that flattens to 2 scores
        let flat: Vec<f32> = output.iter().copied().collect();
        if flat.len() != 2 {
            return Err(ModelError::UnexpectedOutput(format!(
                "classification output has shape {:?}, expected [1, 2]",
                output.shape()
            )));
        }

        Ok(ClassScores([flat[0], flat[1]]))
    }

    async fn segment(&self, input: Array4<f32>) -> Result<Array2<f32>, ModelError> {
        let output = self.segmentation.run(input).await?;

        let side = INPUT_SIZE as usize;
        let expected = side * side;
        let flat: Vec<f32> = output.iter().copied().collect();
        if flat.len() != expected {
            return Err(ModelError::UnexpectedOutput(format!(
                "segmentation output has shape {:?}, expected [1, {side}, {side}, 1]",
                output.shape()
            )));
        }

        Array2::from_shape_vec((side, side), flat)
            .map_err(|e| ModelError::UnexpectedOutput(e.to_string()))
    }

    fn is_loaded(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_artifact_error() {
        let result = OnnxSession::load(Path::new("/nonexistent/classification.onnx"));
        assert!(matches!(result, Err(ModelError::ArtifactMissing(_))));
    }

    #[test]
    fn test_gateway_load_reports_missing_path() {
        let config = ModelConfig {
            model_dir: PathBuf::from("/nonexistent"),
            classification_model: "classification.onnx".to_string(),
            segmentation_model: "segmentation.onnx".to_string(),
        };
        let err = OnnxModelGateway::load(&config).unwrap_err();
        assert!(err.to_string().contains("classification.onnx"));
    }
}
