//! Server configuration
//!
//! Configuration is loaded from environment variables. See `.env.example` for documentation.

use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,

    /// Model artifact configuration
    pub model: ModelConfig,

    /// Upload configuration
    pub upload: UploadConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Directory containing model artifacts
    pub model_dir: PathBuf,
    /// Classification model filename (relative to model_dir)
    pub classification_model: String,
    /// Segmentation model filename (relative to model_dir)
    pub segmentation_model: String,
}

/// Upload-related configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum upload size in bytes
    pub max_upload_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model: ModelConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("weights"),
            classification_model: "classification.onnx".to_string(),
            segmentation_model: "segmentation.onnx".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl ModelConfig {
    /// Full path to the classification model artifact
    pub fn classification_path(&self) -> PathBuf {
        self.model_dir.join(&self.classification_model)
    }

    /// Full path to the segmentation model artifact
    pub fn segmentation_path(&self) -> PathBuf {
        self.model_dir.join(&self.segmentation_model)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Server config
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT")
            && let Ok(p) = port.parse()
        {
            config.port = p;
        }

        // Model config
        if let Ok(dir) = env::var("MODEL_DIR")
            && !dir.is_empty()
        {
            config.model.model_dir = PathBuf::from(dir);
        }
        if let Ok(name) = env::var("CLASSIFICATION_MODEL")
            && !name.is_empty()
        {
            config.model.classification_model = name;
        }
        if let Ok(name) = env::var("SEGMENTATION_MODEL")
            && !name.is_empty()
        {
            config.model.segmentation_model = name;
        }

        // Upload config
        if let Ok(val) = env::var("MAX_UPLOAD_MB")
            && let Ok(mb) = val.parse::<usize>()
        {
            config.upload.max_upload_size = mb * 1024 * 1024;
        }

        config
    }
}
