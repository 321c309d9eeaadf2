//! Core domain types for the genre classifier server.
//!
//! This crate owns everything between the HTTP layer and the trained model:
//!
//! - [`CredentialGate`]: shared-secret check for the `X-API-Key` header
//! - [`PredictRequest`] and [`FeatureVector`]: request validation
//! - [`Classifier`] and [`LabelDecoder`]: the narrow model capabilities
//! - [`Predictor`]: reshapes, predicts and decodes a single vector
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genre_core::{
//!     Classifier, EncodedLabel, LabelDecoder, ModelError, PredictRequest, Predictor,
//!     EXPECTED_FEATURE_COUNT,
//! };
//! use ndarray::ArrayView2;
//!
//! struct AlwaysFirst;
//!
//! impl Classifier for AlwaysFirst {
//!     fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<EncodedLabel>, ModelError> {
//!         Ok(vec![0; x.nrows()])
//!     }
//! }
//!
//! struct Genres(Vec<String>);
//!
//! impl LabelDecoder for Genres {
//!     fn inverse_transform(&self, y: &[EncodedLabel]) -> Result<Vec<String>, ModelError> {
//!         Ok(y.iter().map(|&i| self.0[i].clone()).collect())
//!     }
//!
//!     fn classes(&self) -> &[String] {
//!         &self.0
//!     }
//! }
//!
//! let predictor = Predictor::new(Arc::new(AlwaysFirst), Arc::new(Genres(vec!["jazz".into()])));
//! let features = PredictRequest { features: vec![0.5; EXPECTED_FEATURE_COUNT] }
//!     .validate()
//!     .unwrap();
//!
//! assert_eq!(predictor.predict(&features).unwrap().predicted_genre, "jazz");
//! ```

mod credential;
mod features;
mod model;
mod predictor;

pub use ndarray;

pub use credential::{AuthError, CredentialGate, API_KEY_ENV, API_KEY_HEADER};
pub use features::{FeatureVector, PredictRequest, ValidationError, EXPECTED_FEATURE_COUNT};
pub use model::{Classifier, EncodedLabel, LabelDecoder, ModelError};
pub use predictor::{PredictionError, PredictionResult, Predictor};
