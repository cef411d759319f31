//! # llm-gateway
//!
//! A small completion gateway for OpenAI-compatible chat APIs.
//!
//! A caller hands over raw text or a ready conversation, the gateway issues
//! exactly one request and returns the first choice's text. There is no retry,
//! caching or streaming; failures come back as a typed [`ProviderError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_gateway::{ApiKey, CallerAdapter, CompletionGateway, HostedProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = CompletionGateway::builder(HostedProvider::OpenRouter)
//!         .api_key(ApiKey::Default)?
//!         .build()?;
//!
//!     let answer = CallerAdapter::new(gateway)
//!         .generate_completion("What is the meaning of life?")
//!         .await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod completions;
pub mod core;
pub mod provider;

pub use completions::{ChatCompletionsClient, ChatCompletionsConfig};
pub use crate::core::{
    ApiKey, CallerAdapter, ChatRole, Completion, CompletionGateway, CompletionProvider,
    CompletionRequest, ConfigurationError, Conversation, Credential, GatewayBuilder,
    HttpClientConfig, LanguageModelUsage, LlmError, Message, Prompt, ProviderError, normalize,
};
pub use provider::{HostedProvider, OpenAiConfig, OpenRouterConfig, Provider};
