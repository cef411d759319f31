//! Chat completions response body.
//!
//! Only `choices[].message.content` is required. Everything else is optional
//! because OpenAI-compatible providers disagree on what they send back.

use serde::Deserialize;

use crate::core::{Completion, LanguageModelUsage, ProviderError};

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Some providers omit counters they do not track; missing ones read as zero.
#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl TryFrom<ChatCompletionResponse> for Completion {
    type Error = ProviderError;

    /// Takes the first choice. Its content is returned untouched.
    fn try_from(response: ChatCompletionResponse) -> Result<Self, Self::Error> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let text = choice.message.content.ok_or(ProviderError::MissingContent)?;

        Ok(Completion {
            text,
            id: response.id,
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage.map(|u| LanguageModelUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}
