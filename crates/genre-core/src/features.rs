//! Request payload and feature vector validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of audio features every request must carry.
pub const EXPECTED_FEATURE_COUNT: usize = 57;

/// Reasons a request body is rejected before reaching the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The body could not be decoded into a feature list.
    #[error("Invalid request body: {0}")]
    Malformed(String),

    #[error("features must contain exactly {expected} values, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("features[{index}] must be a finite number")]
    NonFinite { index: usize },
}

/// JSON body accepted by `/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

impl PredictRequest {
    /// Checks the payload shape and returns the validated vector.
    pub fn validate(self) -> Result<FeatureVector, ValidationError> {
        FeatureVector::new(self.features)
    }
}

/// Exactly [`EXPECTED_FEATURE_COUNT`] finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.len() != EXPECTED_FEATURE_COUNT {
            return Err(ValidationError::Length {
                expected: EXPECTED_FEATURE_COUNT,
                actual: values.len(),
            });
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite { index });
        }

        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = ValidationError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_length() {
        let vector = FeatureVector::new(vec![1.0; EXPECTED_FEATURE_COUNT]).unwrap();
        assert_eq!(vector.len(), EXPECTED_FEATURE_COUNT);
        assert!(!vector.is_empty());
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        for len in [0, 1, 56, 58, 1000] {
            let err = FeatureVector::new(vec![0.0; len]).unwrap_err();
            assert_eq!(
                err,
                ValidationError::Length { expected: EXPECTED_FEATURE_COUNT, actual: len }
            );
        }
    }

    #[test]
    fn test_length_message_names_both_counts() {
        let err = FeatureVector::new(vec![0.0; 3]).unwrap_err();
        assert_eq!(err.to_string(), "features must contain exactly 57 values, got 3");
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut values = vec![0.0; EXPECTED_FEATURE_COUNT];
        values[12] = f64::NAN;
        assert_eq!(
            FeatureVector::new(values).unwrap_err(),
            ValidationError::NonFinite { index: 12 }
        );

        let mut values = vec![0.0; EXPECTED_FEATURE_COUNT];
        values[0] = f64::NEG_INFINITY;
        assert_eq!(
            FeatureVector::try_from(values).unwrap_err(),
            ValidationError::NonFinite { index: 0 }
        );
    }

    #[test]
    fn test_request_json_decoding() {
        let body = serde_json::json!({ "features": vec![1; EXPECTED_FEATURE_COUNT] });
        let request: PredictRequest = serde_json::from_value(body).unwrap();
        let vector = request.validate().unwrap();
        assert_eq!(vector.as_slice()[0], 1.0);
    }

    #[test]
    fn test_request_rejects_non_numeric_entries() {
        let mut entries = vec![serde_json::json!(0.5); EXPECTED_FEATURE_COUNT];
        entries[3] = serde_json::json!("0.5");
        let body = serde_json::json!({ "features": entries });
        assert!(serde_json::from_value::<PredictRequest>(body).is_err());

        let mut entries = vec![serde_json::json!(0.5); EXPECTED_FEATURE_COUNT];
        entries[56] = serde_json::Value::Null;
        let body = serde_json::json!({ "features": entries });
        assert!(serde_json::from_value::<PredictRequest>(body).is_err());
    }

    #[test]
    fn test_request_requires_features_field() {
        let body = serde_json::json!({ "values": [1.0, 2.0] });
        assert!(serde_json::from_value::<PredictRequest>(body).is_err());
    }
}
