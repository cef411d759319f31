pub mod adapter;
pub mod builder;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod http;
pub mod traits;
pub mod types;

pub use adapter::{CallerAdapter, normalize};
pub use builder::{ApiKey, GatewayBuilder};
pub use credential::Credential;
pub use error::{ConfigurationError, LlmError, ProviderError};
pub use gateway::CompletionGateway;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::CompletionProvider;
pub use types::{
    ChatRole, Completion, CompletionRequest, Conversation, LanguageModelUsage, Message, Prompt,
};
