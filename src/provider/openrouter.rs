//! OpenRouter provider configuration.
//!
//! OpenRouter routes requests across many upstream models and asks clients to
//! identify themselves with `HTTP-Referer` and `X-Title`. Both are sent on every
//! request; they carry no meaning for the completion itself.

use crate::completions::ChatCompletionsConfig;
use crate::core::{ConfigurationError, Credential, HttpClientConfig};
use crate::provider::constants::openrouter;

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub credential: Credential,
    pub base_url: String,
    pub http_referer: String,
    pub x_title: String,
    pub http_config: HttpClientConfig,
}

impl OpenRouterConfig {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: openrouter::API_BASE.to_string(),
            http_referer: openrouter::DEFAULT_HTTP_REFERER.to_string(),
            x_title: openrouter::DEFAULT_APP_TITLE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    /// Same as [`OpenRouterConfig::new`] but takes the raw secret.
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self::new(Credential::new(api_key)?))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_http_referer(mut self, http_referer: impl Into<String>) -> Self {
        self.http_referer = http_referer.into();
        self
    }

    pub fn with_x_title(mut self, x_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self
    }
}

impl ChatCompletionsConfig for OpenRouterConfig {
    fn provider(&self) -> super::Provider {
        super::Provider::OpenRouter
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> (String, String) {
        self.credential.bearer_header()
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        vec![
            ("HTTP-Referer".to_string(), self.http_referer.clone()),
            ("X-Title".to_string(), self.x_title.clone()),
        ]
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}
