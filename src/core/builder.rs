use std::marker::PhantomData;
use std::time::Duration;

use super::{
    credential::Credential, error::ConfigurationError, gateway::CompletionGateway,
    http::HttpClientConfig,
};
use crate::{
    completions::ChatCompletionsClient,
    provider::{HostedProvider, OpenAiConfig, OpenRouterConfig},
};

pub struct Init;
pub struct CredentialSet;

/// Where the gateway's credential comes from.
#[derive(Debug, Clone)]
pub enum ApiKey {
    /// The provider's default environment variable, e.g. `OPENROUTER_API_KEY`.
    Default,
    /// A named environment variable.
    Env(String),
    /// An explicit secret.
    Value(String),
}

/// Typestate builder for [`CompletionGateway`]. A credential must be supplied
/// before `build` is reachable. Only hosted providers can be built here; other
/// backends go through [`CompletionGateway::from_provider`].
pub struct GatewayBuilder<State> {
    provider: HostedProvider,
    credential: Option<Credential>,
    base_url: Option<String>,
    http_referer: Option<String>,
    app_title: Option<String>,
    http_config: HttpClientConfig,
    _state: PhantomData<State>,
}

impl<State> GatewayBuilder<State> {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn http_referer(mut self, http_referer: impl Into<String>) -> Self {
        self.http_referer = Some(http_referer.into());
        self
    }

    pub fn app_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = Some(app_title.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = timeout;
        self
    }

    /// Replaces the default `llm-gateway/<version>` user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(user_agent.into());
        self
    }

    pub fn http_client_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl GatewayBuilder<Init> {
    pub(crate) fn new(provider: HostedProvider) -> Self {
        Self {
            provider,
            credential: None,
            base_url: None,
            http_referer: None,
            app_title: None,
            http_config: HttpClientConfig::default(),
            _state: PhantomData,
        }
    }

    pub fn api_key(self, api_key: ApiKey) -> Result<GatewayBuilder<CredentialSet>, ConfigurationError> {
        let credential = match api_key {
            ApiKey::Default => Credential::from_env(self.provider.default_api_key_env_var())?,
            ApiKey::Env(var) => Credential::from_env(&var)?,
            ApiKey::Value(secret) => Credential::new(secret)?,
        };

        Ok(self.credential(credential))
    }

    pub fn credential(self, credential: Credential) -> GatewayBuilder<CredentialSet> {
        GatewayBuilder {
            provider: self.provider,
            credential: Some(credential),
            base_url: self.base_url,
            http_referer: self.http_referer,
            app_title: self.app_title,
            http_config: self.http_config,
            _state: PhantomData,
        }
    }
}

impl GatewayBuilder<CredentialSet> {
    pub fn build(self) -> Result<CompletionGateway, ConfigurationError> {
        let credential = self.credential.ok_or_else(|| {
            ConfigurationError::MissingCredential("no credential supplied".to_string())
        })?;

        match self.provider {
            HostedProvider::OpenRouter => {
                let mut config =
                    OpenRouterConfig::new(credential).with_http_config(self.http_config);
                if let Some(base_url) = self.base_url {
                    config = config.with_base_url(base_url);
                }
                if let Some(referer) = self.http_referer {
                    config = config.with_http_referer(referer);
                }
                if let Some(title) = self.app_title {
                    config = config.with_x_title(title);
                }
                CompletionGateway::openrouter(config)
            }
            HostedProvider::OpenAI => {
                let mut config = OpenAiConfig::new(credential).with_http_config(self.http_config);
                if let Some(base_url) = self.base_url {
                    config = config.with_base_url(base_url);
                }
                if let Some(referer) = self.http_referer {
                    config = config.with_header("HTTP-Referer", referer);
                }
                if let Some(title) = self.app_title {
                    config = config.with_header("X-Title", title);
                }
                Ok(CompletionGateway::from_provider(ChatCompletionsClient::new(config)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    #[test]
    fn explicit_key_builds_an_openrouter_gateway() {
        let gateway = CompletionGateway::builder(HostedProvider::OpenRouter)
            .api_key(ApiKey::Value("sk-test".to_string()))
            .unwrap()
            .base_url("http://127.0.0.1:9")
            .app_title("Smoke Test")
            .user_agent("smoke-test/1.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(gateway.provider(), Provider::OpenRouter);
    }

    #[test]
    fn openai_gateway_reports_its_provider() {
        let gateway = CompletionGateway::builder(HostedProvider::OpenAI)
            .credential(Credential::new("sk-test").unwrap())
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        assert_eq!(gateway.provider(), Provider::OpenAI);
    }

    #[test]
    fn empty_key_fails_at_the_builder() {
        let result =
            CompletionGateway::builder(HostedProvider::OpenAI).api_key(ApiKey::Value(String::new()));
        assert!(matches!(result, Err(ConfigurationError::MissingCredential(_))));
    }

    #[test]
    fn unset_env_var_fails_at_the_builder() {
        let result = CompletionGateway::builder(HostedProvider::OpenRouter)
            .api_key(ApiKey::Env("LLM_GATEWAY_BUILDER_TEST_UNSET".to_string()));
        assert!(matches!(result, Err(ConfigurationError::MissingCredential(_))));
    }

    #[test]
    fn unsendable_routing_headers_fail_the_build() {
        for provider in [HostedProvider::OpenRouter, HostedProvider::OpenAI] {
            let result = CompletionGateway::builder(provider)
                .credential(Credential::new("sk-test").unwrap())
                .app_title("Agent\r\nX-Injected: 1")
                .build();
            assert!(
                matches!(result, Err(ConfigurationError::InvalidHeader { ref name, .. }) if name == "X-Title"),
                "{provider} accepted an unsendable title"
            );
        }

        let result = CompletionGateway::builder(HostedProvider::OpenRouter)
            .credential(Credential::new("sk-test").unwrap())
            .http_referer("https://example.com/\n")
            .build();
        assert!(matches!(result, Err(ConfigurationError::InvalidHeader { .. })));
    }

    #[test]
    fn unsendable_user_agent_fails_the_build() {
        let result = CompletionGateway::builder(HostedProvider::OpenRouter)
            .credential(Credential::new("sk-test").unwrap())
            .user_agent("agent\n2.0")
            .build();
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidHeader { ref name, .. }) if name == "User-Agent"
        ));
    }
}
