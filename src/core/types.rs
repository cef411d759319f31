use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use crate::provider::constants::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered messages submitted as context for one completion.
pub type Conversation = Vec<Message>;

/// What a caller may hand to the adapter: raw text or a ready conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text(String),
    Conversation(Conversation),
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

impl From<Conversation> for Prompt {
    fn from(conversation: Conversation) -> Self {
        Prompt::Conversation(conversation)
    }
}

impl From<&[Message]> for Prompt {
    fn from(conversation: &[Message]) -> Self {
        Prompt::Conversation(conversation.to_vec())
    }
}

/// A single completion call. Every field is sent to the provider as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub conversation: Conversation,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Upper bound for this call only. The client-wide timeout still applies.
    pub timeout: Option<Duration>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, conversation: Conversation) -> Self {
        Self {
            model: model.into(),
            conversation,
            temperature: defaults::TEMPERATURE,
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
            timeout: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the parameters the provider would otherwise reject after a round trip.
    /// Message order and roles are deliberately left to the provider.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::InvalidRequest(
                "model identifier must not be empty".to_string(),
            ));
        }

        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ProviderError::InvalidRequest(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_output_tokens == 0 {
            return Err(ProviderError::InvalidRequest(
                "max_output_tokens must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageModelUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The first completion choice together with the response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub id: Option<String>,
    /// Model the provider reports having used, which may differ from the request.
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<LanguageModelUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest::new("deepseek/deepseek-r1:free", vec![Message::user("hi")])
    }

    #[test]
    fn new_request_uses_raw_text_defaults() {
        let req = request();
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_output_tokens, 2000);
        assert_eq!(req.timeout, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert!(request().with_temperature(0.0).validate().is_ok());
        assert!(request().with_temperature(2.0).validate().is_ok());
        assert!(request().with_temperature(2.01).validate().is_err());
        assert!(request().with_temperature(-0.1).validate().is_err());
        assert!(request().with_temperature(f32::NAN).validate().is_err());
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let err = request().with_max_output_tokens(0).validate().unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[test]
    fn blank_model_is_rejected() {
        let req = CompletionRequest::new("  ", vec![Message::user("hi")]);
        assert!(matches!(
            req.validate(),
            Err(ProviderError::InvalidRequest(_))
        ));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::assistant("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "ok" }));
    }
}
