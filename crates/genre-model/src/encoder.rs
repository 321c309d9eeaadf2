//! Encoded label to genre name mapping.

use genre_core::{EncodedLabel, LabelDecoder, ModelError};
use serde::{Deserialize, Serialize};

use crate::ArtifactError;

/// Genre names indexed by their encoded label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncoderSpec")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct EncoderSpec {
    classes: Vec<String>,
}

impl TryFrom<EncoderSpec> for LabelEncoder {
    type Error = ArtifactError;

    fn try_from(spec: EncoderSpec) -> Result<Self, Self::Error> {
        Self::new(spec.classes)
    }
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        if classes.is_empty() {
            return Err(ArtifactError("label encoder has no classes".to_string()));
        }
        Ok(Self { classes })
    }

    /// Encoded label of a genre, if known.
    pub fn transform(&self, genre: &str) -> Option<EncodedLabel> {
        self.classes.iter().position(|c| c == genre)
    }
}

impl LabelDecoder for LabelEncoder {
    fn inverse_transform(&self, y: &[EncodedLabel]) -> Result<Vec<String>, ModelError> {
        let unseen: Vec<EncodedLabel> = y
            .iter()
            .copied()
            .filter(|&label| label >= self.classes.len())
            .collect();
        if !unseen.is_empty() {
            return Err(ModelError::UnseenLabels(unseen));
        }

        Ok(y.iter().map(|&label| self.classes[label].clone()).collect())
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec!["blues".into(), "jazz".into(), "metal".into()]).unwrap()
    }

    #[test]
    fn test_inverse_transform() {
        let encoder = encoder();
        assert_eq!(encoder.inverse_transform(&[2, 0]).unwrap(), vec!["metal", "blues"]);
        assert!(encoder.inverse_transform(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unseen_labels_are_reported_together() {
        let err = encoder().inverse_transform(&[1, 3, 0, 8]).unwrap_err();
        assert_eq!(err, ModelError::UnseenLabels(vec![3, 8]));
        assert_eq!(err.to_string(), "y contains previously unseen labels: [3, 8]");
    }

    #[test]
    fn test_transform_round_trips_names() {
        let encoder = encoder();
        assert_eq!(encoder.transform("jazz"), Some(1));
        assert_eq!(encoder.transform("polka"), None);
    }

    #[test]
    fn test_empty_encoder_is_rejected() {
        assert!(LabelEncoder::new(vec![]).is_err());
    }

    #[test]
    fn test_parses_exported_json() {
        let encoder: LabelEncoder =
            serde_json::from_str(r#"{"classes": ["pop", "rock"]}"#).unwrap();
        assert_eq!(encoder.classes(), &["pop".to_string(), "rock".to_string()]);

        assert!(serde_json::from_str::<LabelEncoder>(r#"{"classes": []}"#).is_err());
    }
}
