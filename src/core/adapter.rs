use tracing::debug;

use super::{
    error::ProviderError,
    gateway::CompletionGateway,
    types::{CompletionRequest, Conversation, Message, Prompt},
};
use crate::provider::constants::defaults;

/// Turns a prompt into the conversation the provider expects.
///
/// Raw text becomes a single `user` message with the text untouched. A
/// conversation is passed through as-is; role order is the provider's concern.
pub fn normalize(prompt: impl Into<Prompt>) -> Conversation {
    match prompt.into() {
        Prompt::Text(text) => vec![Message::user(text)],
        Prompt::Conversation(conversation) => conversation,
    }
}

/// Caller-facing entry point: normalizes prompts and fills in the request
/// parameters a raw-text caller does not supply.
#[derive(Debug, Clone)]
pub struct CallerAdapter {
    gateway: CompletionGateway,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl CallerAdapter {
    pub fn new(gateway: CompletionGateway) -> Self {
        Self {
            gateway,
            model: defaults::MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn gateway(&self) -> &CompletionGateway {
        &self.gateway
    }

    /// Builds the request the adapter would send for `prompt`.
    pub fn request(&self, prompt: impl Into<Prompt>) -> CompletionRequest {
        CompletionRequest::new(self.model.clone(), normalize(prompt))
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens)
    }

    pub async fn generate_completion(
        &self,
        prompt: impl Into<Prompt>,
    ) -> Result<String, ProviderError> {
        let request = self.request(prompt);
        debug!(
            model = %request.model,
            messages = request.conversation.len(),
            "Delegating prompt to gateway"
        );
        self.gateway.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ChatRole;

    #[test]
    fn raw_text_becomes_a_single_user_message() {
        let text = "  Analyze this <page>\n\twith \"quotes\" & unicode ✓  ";
        let conversation = normalize(text);
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation[0].role, ChatRole::User);
        assert_eq!(conversation[0].content, text);
    }

    #[test]
    fn conversations_pass_through_unchanged() {
        // Out-of-order roles are forwarded; the provider decides what is legal.
        let conversation = vec![
            Message::assistant("I spoke first"),
            Message::system("late system prompt"),
            Message::user("ping"),
        ];
        assert_eq!(normalize(conversation.clone()), conversation);
        assert_eq!(normalize(normalize(conversation.clone())), conversation);
    }

    #[test]
    fn empty_conversation_is_not_rewritten() {
        assert!(normalize(Conversation::new()).is_empty());
    }
}
