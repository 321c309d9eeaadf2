//! Single-vector prediction dispatch.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use ndarray::{Array2, ShapeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::FeatureVector;
use crate::model::{Classifier, LabelDecoder, ModelError};

/// Body returned by a successful `/predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_genre: String,
}

/// Any failure between a validated vector and a decoded label.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Prediction failed: {0}")]
    Reshape(#[from] ShapeError),

    #[error("Prediction failed: {0}")]
    Model(#[from] ModelError),

    #[error("Prediction failed: {stage} returned no output")]
    EmptyOutput { stage: &'static str },

    #[error("Prediction failed: {0}")]
    Panicked(String),
}

/// Runs the classifier and decoder for one request.
///
/// Cloning is cheap; both collaborators sit behind `Arc` and are only read.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    decoder: Arc<dyn LabelDecoder>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>, decoder: Arc<dyn LabelDecoder>) -> Self {
        Self { classifier, decoder }
    }

    /// Labels the decoder can return.
    pub fn labels(&self) -> &[String] {
        self.decoder.classes()
    }

    /// Predicts the genre for a single feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, PredictionError> {
        let x = Array2::from_shape_vec((1, features.len()), features.as_slice().to_vec())?;

        let genre = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(x)))
            .map_err(|payload| PredictionError::Panicked(panic_message(payload.as_ref())))??;

        Ok(PredictionResult { predicted_genre: genre })
    }

    fn dispatch(&self, x: Array2<f64>) -> Result<String, PredictionError> {
        let encoded = self.classifier.predict(x.view())?;
        let label = *encoded
            .first()
            .ok_or(PredictionError::EmptyOutput { stage: "classifier" })?;

        self.decoder
            .inverse_transform(&[label])?
            .into_iter()
            .next()
            .ok_or(PredictionError::EmptyOutput { stage: "encoder" })
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("labels", &self.labels())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "model panicked".to_string()
    }
}
