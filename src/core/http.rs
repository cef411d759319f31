//! Shared HTTP client for all chat completions backends.
//!
//! Every call makes exactly one attempt. Retry and backoff are the caller's
//! business.

use std::time::Duration;

use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::{ConfigurationError, ProviderError};

/// Configuration for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total time allowed for a single request, connect through body
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Overrides the provider's default user agent
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
        }
    }
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// `default_user_agent` is used unless the config carries its own.
    pub fn new(
        config: &HttpClientConfig,
        default_user_agent: &str,
    ) -> Result<Self, ConfigurationError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(default_user_agent);
        let user_agent =
            HeaderValue::from_str(user_agent).map_err(|e| ConfigurationError::InvalidHeader {
                name: "User-Agent".to_string(),
                reason: e.to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|source| ConfigurationError::HttpClient { source })?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Non-2xx statuses are mapped onto [`ProviderError`]: 401/403 become
    /// `Authentication`, 429 becomes `RateLimited`, everything else `Api`.
    #[tracing::instrument(
        name = "http_post_json",
        level = "debug",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Req,
    ) -> Result<Res, ProviderError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let req_builder = self.client.post(url).headers(headers.clone()).json(body);

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            ProviderError::Network {
                message: describe_transport_error(&e),
                source: Box::new(e),
            }
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| ProviderError::Network {
            message: format!("failed to read response body: {e}"),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            return Err(status_error(status, &response_text));
        }

        debug!(status = %status, bytes = response_text.len(), "HTTP request successful");

        let response_value: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| ProviderError::Parse {
                message: "response body is not valid JSON".to_string(),
                source: Some(Box::new(e)),
            })?;

        // OpenAI-compatible gateways sometimes report upstream failures in a 200 body.
        if let Some(message) = error_message(&response_value) {
            warn!("API returned an error object with a success status");
            return Err(ProviderError::Api {
                status: error_code(&response_value),
                message,
            });
        }

        serde_json::from_value(response_value).map_err(|e| ProviderError::Parse {
            message: "failed to decode API response".to_string(),
            source: Some(Box::new(e)),
        })
    }
}

/// Builds the per-request header map once, at construction. The
/// `Authorization` value is marked sensitive so it never shows up in `Debug`.
pub(crate) fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, ConfigurationError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = |reason: String| ConfigurationError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        // The value is never echoed: it may be a secret.
        let mut header_value = HeaderValue::from_str(value)
            .map_err(|_| invalid("value contains characters not allowed in a header".to_string()))?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Transport failures keep reqwest's description, which names the URL but
/// never the request headers.
fn describe_transport_error(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "failed to connect to provider"
    } else {
        "request failed"
    };
    format!("{kind}: {e}")
}

/// Maps a non-success status and its body onto a typed error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| error_message(&value))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            status: status.as_u16(),
            message,
        },
        _ => ProviderError::Api {
            status: Some(status.as_u16()),
            message,
        },
    }
}

/// Extracts `error.message` (or a bare string `error`) from an OpenAI-style error body.
fn error_message(value: &serde_json::Value) -> Option<String> {
    let error = value.get("error")?;
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    error.as_str().map(str::to_string)
}

fn error_code(value: &serde_json::Value) -> Option<u16> {
    value
        .get("error")?
        .get("code")?
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
}
