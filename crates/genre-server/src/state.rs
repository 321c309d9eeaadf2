use genre_core::{CredentialGate, Predictor};
use genre_model::{Artifacts, LoadError};
use tracing::{info, warn};

use crate::config::Config;

/// Everything a request handler reads. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub credentials: CredentialGate,
}

impl AppState {
    pub fn new(predictor: Predictor, credentials: CredentialGate) -> Self {
        Self { predictor, credentials }
    }

    /// Loads the model artifacts. Any error here must stop the process.
    pub fn initialize(config: &Config) -> Result<Self, LoadError> {
        let artifacts = Artifacts::load(&config.artifacts)?;

        let credentials = CredentialGate::new(config.api_key.clone());
        if !credentials.is_configured() {
            warn!("API_KEY not configured: every /predict call will fail with 500");
        }

        let state = Self::new(artifacts.predictor(), credentials);
        info!("Serving {} genres: {}", state.predictor.labels().len(), state.predictor.labels().join(", "));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genre_core::{FeatureVector, EXPECTED_FEATURE_COUNT};
    use genre_model::ArtifactPaths;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(artifacts: ArtifactPaths) -> Config {
        Config {
            api_key: Some("s3cret".to_string()),
            host: "127.0.0.1".to_string(),
            port: 0,
            artifacts,
        }
    }

    #[test]
    fn test_initialize_fails_without_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_with(ArtifactPaths {
            pipeline: dir.path().join("missing_pipeline.joblib"),
            encoder: dir.path().join("missing_encoder.joblib"),
        });

        assert!(matches!(AppState::initialize(&config), Err(LoadError::Missing { .. })));
    }

    #[test]
    fn test_initialize_loads_artifacts() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths {
            pipeline: dir.path().join("pipeline.joblib"),
            encoder: dir.path().join("encoder.joblib"),
        };
        let pipeline = serde_json::json!({
            "estimator": {
                "type": "linear",
                "coef": [vec![0.0; EXPECTED_FEATURE_COUNT], vec![0.0; EXPECTED_FEATURE_COUNT]],
                "intercept": [0.0, 1.0],
                "classes": [0, 1],
            },
        });
        fs::write(&paths.pipeline, pipeline.to_string()).unwrap();
        fs::write(&paths.encoder, r#"{"classes": ["hiphop", "reggae"]}"#).unwrap();

        let state = AppState::initialize(&config_with(paths)).unwrap();
        assert!(state.credentials.is_configured());
        assert_eq!(state.predictor.labels(), &["hiphop".to_string(), "reggae".to_string()]);

        let features = FeatureVector::new(vec![0.0; EXPECTED_FEATURE_COUNT]).unwrap();
        assert_eq!(state.predictor.predict(&features).unwrap().predicted_genre, "reggae");
    }
}
