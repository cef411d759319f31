pub(crate) mod constants;
pub(crate) mod openai;
pub(crate) mod openrouter;

pub use openai::OpenAiConfig;
pub use openrouter::OpenRouterConfig;

/// Identifies the backend behind a gateway, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    OpenRouter,
    /// Any other backend plugged in with `CompletionGateway::from_provider`.
    Custom(&'static str),
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "OpenAI"),
            Provider::OpenRouter => write!(f, "OpenRouter"),
            Provider::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Providers the gateway builder can reach over HTTP on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedProvider {
    OpenAI,
    OpenRouter,
}

impl HostedProvider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            HostedProvider::OpenAI => constants::openai::API_KEY_ENV_VAR,
            HostedProvider::OpenRouter => constants::openrouter::API_KEY_ENV_VAR,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            HostedProvider::OpenAI => constants::openai::API_BASE,
            HostedProvider::OpenRouter => constants::openrouter::API_BASE,
        }
    }
}

impl From<HostedProvider> for Provider {
    fn from(provider: HostedProvider) -> Self {
        match provider {
            HostedProvider::OpenAI => Provider::OpenAI,
            HostedProvider::OpenRouter => Provider::OpenRouter,
        }
    }
}

impl std::fmt::Display for HostedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Provider::from(*self).fmt(f)
    }
}
