//! Capabilities the server needs from a trained model.

use ndarray::ArrayView2;
use thiserror::Error;

/// Class index produced by a [`Classifier`].
pub type EncodedLabel = usize;

/// Errors raised by a model while predicting or decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Input width does not match what the model was fitted on.
    #[error("X has {actual} features, but pipeline is expecting {expected} features as input.")]
    FeatureMismatch { expected: usize, actual: usize },

    /// Encoded labels outside the encoder's class list.
    #[error("y contains previously unseen labels: {0:?}")]
    UnseenLabels(Vec<EncodedLabel>),

    /// Any other failure inside the model.
    #[error("{0}")]
    Internal(String),
}

/// Maps rows of a feature matrix to encoded labels, one per row.
///
/// Implementations are shared across concurrent requests and must not
/// mutate themselves while predicting.
pub trait Classifier: Send + Sync {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<EncodedLabel>, ModelError>;
}

/// Maps encoded labels back to human-readable genres.
pub trait LabelDecoder: Send + Sync {
    fn inverse_transform(&self, y: &[EncodedLabel]) -> Result<Vec<String>, ModelError>;

    /// Every label this decoder can produce, in encoded order.
    fn classes(&self) -> &[String];
}
