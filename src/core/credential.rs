use std::fmt;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use super::error::ConfigurationError;

/// Secret token for the provider. Never printed, never part of an error message.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Rejects missing, empty and whitespace-only secrets, and secrets that
    /// cannot be sent in an `Authorization` header.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential(
                "credential is empty".to_string(),
            ));
        }
        if HeaderValue::from_str(&format!("Bearer {secret}")).is_err() {
            return Err(ConfigurationError::InvalidCredential(
                "credential contains characters not allowed in an HTTP header".to_string(),
            ));
        }
        Ok(Self(SecretString::from(secret)))
    }

    /// Reads the credential from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, ConfigurationError> {
        let secret = std::env::var(var)
            .map_err(|_| ConfigurationError::MissingCredential(format!("{var} not set")))?;
        Self::new(secret).map_err(|e| match e {
            ConfigurationError::MissingCredential(_) => {
                ConfigurationError::MissingCredential(format!("{var} is empty"))
            }
            other => other,
        })
    }

    pub(crate) fn bearer_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.0.expose_secret()),
        )
    }
}

impl TryFrom<String> for Credential {
    type Error = ConfigurationError;

    fn try_from(secret: String) -> Result<Self, Self::Error> {
        Self::new(secret)
    }
}

impl TryFrom<&str> for Credential {
    type Error = ConfigurationError;

    fn try_from(secret: &str) -> Result<Self, Self::Error> {
        Self::new(secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_secrets_are_rejected() {
        assert!(matches!(
            Credential::new(""),
            Err(ConfigurationError::MissingCredential(_))
        ));
        assert!(matches!(
            Credential::new(" \t\n"),
            Err(ConfigurationError::MissingCredential(_))
        ));
    }

    #[test]
    fn secrets_unusable_in_a_header_are_rejected_without_echo() {
        for secret in ["sk-te\nst", "sk-test\r", "sk-\u{0}-test"] {
            let err = Credential::new(secret).unwrap_err();
            assert!(matches!(err, ConfigurationError::InvalidCredential(_)));
            assert!(!err.to_string().contains("sk-"));
        }
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new("sk-test-very-secret").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("sk-test-very-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn bearer_header_carries_the_secret() {
        let credential = Credential::new("sk-test").unwrap();
        assert_eq!(
            credential.bearer_header(),
            ("Authorization".to_string(), "Bearer sk-test".to_string())
        );
    }

    #[test]
    fn missing_env_var_is_a_configuration_error() {
        let err = Credential::from_env("LLM_GATEWAY_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("LLM_GATEWAY_TEST_UNSET_VARIABLE not set"));
    }
}
