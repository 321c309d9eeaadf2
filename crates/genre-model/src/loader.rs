//! One-shot artifact loading at startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use genre_core::{LabelDecoder, Predictor};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::encoder::LabelEncoder;
use crate::pipeline::{ClassifierPipeline, PipelineSpec};

pub const DEFAULT_PIPELINE_FILE: &str = "music_classifier_pipeline.joblib";
pub const DEFAULT_ENCODER_FILE: &str = "label_encoder.joblib";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

/// Failures that prevent the server from starting.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(
        "Model artifacts are missing. Expected files: {}, {}",
        pipeline.display(),
        encoder.display()
    )]
    Missing { pipeline: PathBuf, encoder: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("Invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Where the two artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub pipeline: PathBuf,
    pub encoder: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            pipeline: PathBuf::from(DEFAULT_PIPELINE_FILE),
            encoder: PathBuf::from(DEFAULT_ENCODER_FILE),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Artifacts
// ─────────────────────────────────────────────────────────────────────────────

/// The loaded pipeline and encoder, shared read-only after startup.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub pipeline: Arc<ClassifierPipeline>,
    pub encoder: Arc<LabelEncoder>,
}

impl Artifacts {
    /// Loads both artifacts, failing if either file is absent or unreadable.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, LoadError> {
        if !paths.pipeline.exists() || !paths.encoder.exists() {
            return Err(LoadError::Missing {
                pipeline: paths.pipeline.clone(),
                encoder: paths.encoder.clone(),
            });
        }

        let spec: PipelineSpec = read_json(&paths.pipeline)?;
        let pipeline = ClassifierPipeline::try_from(spec).map_err(|e| LoadError::Invalid {
            path: paths.pipeline.clone(),
            reason: e.to_string(),
        })?;
        info!(
            "Loaded pipeline from {} ({} features, {} classes)",
            paths.pipeline.display(),
            pipeline.n_features(),
            pipeline.classes().len()
        );

        let encoder: LabelEncoder = read_json(&paths.encoder)?;
        info!(
            "Loaded label encoder from {} ({} genres)",
            paths.encoder.display(),
            encoder.classes().len()
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
            encoder: Arc::new(encoder),
        })
    }

    /// Wires the artifacts into a prediction dispatcher.
    pub fn predictor(&self) -> Predictor {
        Predictor::new(self.pipeline.clone(), self.encoder.clone())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
