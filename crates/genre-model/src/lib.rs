//! Trained model artifacts for the genre classifier.
//!
//! The training side exports two JSON files:
//!
//! - the fitted pipeline (scalers followed by a linear estimator), loaded into
//!   [`ClassifierPipeline`]
//! - the label encoder (class names in encoded order), loaded into
//!   [`LabelEncoder`]
//!
//! [`Artifacts::load`] reads both once at startup.

mod encoder;
mod loader;
mod pipeline;

pub use encoder::LabelEncoder;
pub use loader::{ArtifactPaths, Artifacts, LoadError, DEFAULT_ENCODER_FILE, DEFAULT_PIPELINE_FILE};
pub use pipeline::{ClassifierPipeline, Estimator, PipelineSpec, Transform};

/// Structural problem found while building a model from its exported form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ArtifactError(pub String);
