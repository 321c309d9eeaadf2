//! Process configuration read from the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;

use genre_core::API_KEY_ENV;
use genre_model::ArtifactPaths;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings fixed for the lifetime of the process.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactPaths,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let defaults = ArtifactPaths::default();
        let artifacts = ArtifactPaths {
            pipeline: lookup("MODEL_PATH").map(PathBuf::from).unwrap_or(defaults.pipeline),
            encoder: lookup("ENCODER_PATH").map(PathBuf::from).unwrap_or(defaults.encoder),
        };

        Ok(Self {
            api_key: lookup(API_KEY_ENV),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            artifacts,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("artifacts", &self.artifacts)
            .finish()
    }
}
