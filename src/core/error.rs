use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures detected while constructing a gateway. These are fatal: a gateway
/// that fails to build never issues a request.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}

/// Failures of a single completion call. The gateway never retries; each of
/// these is surfaced to the caller as soon as it happens.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("authentication rejected (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("rate limited (HTTP {status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed response: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("provider returned no completion choices")]
    EmptyResponse,

    #[error("first completion choice carries no message content")]
    MissingContent,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("request cancelled by caller")]
    Cancelled,

    #[error("blocking completion called from inside an async runtime; await `complete` instead")]
    BlockingInRuntime,
}

impl ProviderError {
    /// HTTP status reported by the provider, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Authentication { status, .. }
            | ProviderError::RateLimited { status, .. } => Some(*status),
            ProviderError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Umbrella error for callers that construct and call a gateway in one place.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
