//! Shared client for providers exposing an OpenAI-compatible chat completions API.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::debug;

use super::{request::ChatCompletionRequest, response::ChatCompletionResponse};
use crate::{
    core::{
        Completion, CompletionProvider, CompletionRequest, ConfigurationError, HttpClient,
        HttpClientConfig, ProviderError, http::header_map,
    },
    provider::{Provider, constants::chat},
};

/// Configuration trait for chat completions providers
pub trait ChatCompletionsConfig: Send + Sync {
    /// Model Provider
    fn provider(&self) -> Provider;

    /// Base URL for the API (e.g., `https://openrouter.ai/api/v1`)
    fn base_url(&self) -> &str;

    fn endpoint(&self) -> &str {
        chat::COMPLETIONS_ENDPOINT
    }

    /// Authentication header as (header_name, header_value) tuple
    fn auth_header(&self) -> (String, String);

    /// Additional headers to include with each request. Checked once when the
    /// client is built; an unsendable value fails construction.
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
    }

    /// Default user agent; `HttpClientConfig::user_agent` takes precedence.
    fn user_agent(&self) -> String {
        format!("llm-gateway/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Generic chat completions backend. One instance serves any number of
/// concurrent calls; it holds nothing that changes after construction.
pub struct ChatCompletionsClient<P: ChatCompletionsConfig> {
    config: P,
    url: String,
    headers: HeaderMap,
    http: HttpClient,
}

impl<P: ChatCompletionsConfig> ChatCompletionsClient<P> {
    pub fn new(config: P) -> Result<Self, ConfigurationError> {
        let url = completions_url(config.base_url(), config.endpoint())?;

        let mut headers = vec![config.auth_header()];
        headers.extend(config.extra_headers());
        let headers = header_map(&headers)?;

        let http = HttpClient::new(&config.http_config(), &config.user_agent())?;

        Ok(Self {
            config,
            url,
            headers,
            http,
        })
    }

    pub fn config(&self) -> &P {
        &self.config
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<P: ChatCompletionsConfig> CompletionProvider for ChatCompletionsClient<P> {
    fn provider(&self) -> Provider {
        self.config.provider()
    }

    #[tracing::instrument(
        name = "chat_completion",
        skip(self, request),
        fields(
            provider = %self.config.provider(),
            model = %request.model,
            messages = request.conversation.len()
        ),
        err
    )]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let body = ChatCompletionRequest::from(request);

        let response: ChatCompletionResponse =
            self.http.post_json(&self.url, &self.headers, &body).await?;
        let completion = Completion::try_from(response)?;

        debug!(
            id = completion.id.as_deref().unwrap_or("-"),
            finish_reason = completion.finish_reason.as_deref().unwrap_or("-"),
            "Received completion"
        );
        Ok(completion)
    }
}

/// Joins base URL and endpoint after checking the base is an absolute http(s) URL.
fn completions_url(base_url: &str, endpoint: &str) -> Result<String, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = reqwest::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }

    Ok(format!("{}{}", base_url.trim_end_matches('/'), endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_appended_without_double_slash() {
        assert_eq!(
            completions_url("https://openrouter.ai/api/v1/", "/chat/completions").unwrap(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://127.0.0.1:8080", "/chat/completions").unwrap(),
            "http://127.0.0.1:8080/chat/completions"
        );
    }

    #[test]
    fn malformed_base_urls_are_rejected() {
        for url in ["", "openrouter.ai/api/v1", "ftp://example.com", "mailto:me@example.com"] {
            assert!(
                matches!(
                    completions_url(url, "/chat/completions"),
                    Err(ConfigurationError::InvalidBaseUrl { .. })
                ),
                "{url} should be rejected"
            );
        }
    }
}
