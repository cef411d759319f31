use crate::completions::ChatCompletionsConfig;
use crate::core::{ConfigurationError, Credential, HttpClientConfig};
use crate::provider::constants::openai;

/// OpenAI (or any server mirroring its chat completions API, such as a local
/// inference server) with optional routing headers.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub credential: Credential,
    pub base_url: String,
    pub organization: Option<String>,
    pub extra_headers: Vec<(String, String)>,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: openai::API_BASE.to_string(),
            organization: None,
            extra_headers: Vec::new(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self::new(Credential::new(api_key)?))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl ChatCompletionsConfig for OpenAiConfig {
    fn provider(&self) -> super::Provider {
        super::Provider::OpenAI
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> (String, String) {
        self.credential.bearer_header()
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.extra_headers.clone();
        if let Some(organization) = &self.organization {
            headers.push(("OpenAI-Organization".to_string(), organization.clone()));
        }
        headers
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}
