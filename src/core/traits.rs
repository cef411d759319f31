use async_trait::async_trait;

use super::{
    error::ProviderError,
    types::{Completion, CompletionRequest},
};
use crate::provider::Provider;

/// A backend the gateway can delegate completions to.
///
/// Implementations must be stateless per call: the gateway may invoke
/// `complete` concurrently from many tasks on the same instance.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}
