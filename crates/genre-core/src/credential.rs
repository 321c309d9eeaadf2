//! Shared-secret check for `/predict`.

use std::fmt;

use thiserror::Error;

/// Header carrying the client credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Environment variable holding the expected credential.
pub const API_KEY_ENV: &str = "API_KEY";

/// Reasons a credential check can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The request carried no credential header.
    #[error("Not authenticated")]
    Missing,

    /// The credential did not match the configured secret.
    #[error("Could not validate credentials")]
    Invalid,

    /// The server was started without a secret.
    #[error("Missing {var} environment variable on server.", var = API_KEY_ENV)]
    NotConfigured,
}

/// Compares request credentials against the secret configured at startup.
#[derive(Clone, Default)]
pub struct CredentialGate {
    expected: Option<String>,
}

impl CredentialGate {
    /// Creates a gate for the given secret. An empty secret counts as unset.
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.filter(|key| !key.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Returns the provided credential when it equals the configured secret.
    pub fn check<'a>(&self, provided: Option<&'a str>) -> Result<&'a str, AuthError> {
        let provided = provided.ok_or(AuthError::Missing)?;
        let expected = self.expected.as_deref().ok_or(AuthError::NotConfigured)?;

        if provided != expected {
            return Err(AuthError::Invalid);
        }

        Ok(provided)
    }
}

impl fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_key_passes() {
        let gate = CredentialGate::new(Some("s3cret".to_string()));
        assert_eq!(gate.check(Some("s3cret")), Ok("s3cret"));
    }

    #[test]
    fn test_mismatched_key_is_invalid() {
        let gate = CredentialGate::new(Some("s3cret".to_string()));
        assert_eq!(gate.check(Some("S3CRET")), Err(AuthError::Invalid));
        assert_eq!(gate.check(Some("")), Err(AuthError::Invalid));
        assert_eq!(gate.check(Some("s3cret ")), Err(AuthError::Invalid));
    }

    #[test]
    fn test_missing_header_is_not_authenticated() {
        let gate = CredentialGate::new(Some("s3cret".to_string()));
        assert_eq!(gate.check(None), Err(AuthError::Missing));

        let unconfigured = CredentialGate::new(None);
        assert_eq!(unconfigured.check(None), Err(AuthError::Missing));
    }

    #[test]
    fn test_unconfigured_server() {
        let gate = CredentialGate::new(None);
        assert!(!gate.is_configured());
        assert_eq!(gate.check(Some("anything")), Err(AuthError::NotConfigured));

        let empty = CredentialGate::new(Some(String::new()));
        assert!(!empty.is_configured());
        assert_eq!(empty.check(Some("")), Err(AuthError::NotConfigured));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::NotConfigured.to_string(),
            "Missing API_KEY environment variable on server."
        );
        assert_eq!(AuthError::Invalid.to_string(), "Could not validate credentials");
    }

    #[test]
    fn test_debug_hides_secret() {
        let gate = CredentialGate::new(Some("s3cret".to_string()));
        let rendered = format!("{:?}", gate);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("configured: true"));
    }
}
