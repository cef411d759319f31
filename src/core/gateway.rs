use std::{future::Future, sync::Arc};

use tracing::{debug, warn};

use super::{
    builder::{GatewayBuilder, Init},
    credential::Credential,
    error::{ConfigurationError, ProviderError},
    traits::CompletionProvider,
    types::{Completion, CompletionRequest},
};
use crate::{
    completions::ChatCompletionsClient,
    provider::{HostedProvider, OpenRouterConfig, Provider},
};

/// Owns one configured backend and issues completion requests against it.
///
/// Construction is the only place configuration can fail. After that the
/// gateway is read-only: clones share the same backend, and every call is an
/// independent single attempt with no retained history.
#[derive(Clone)]
pub struct CompletionGateway {
    backend: Arc<dyn CompletionProvider>,
}

impl CompletionGateway {
    /// Gateway for an OpenAI-compatible endpoint with OpenRouter routing headers.
    /// No network I/O happens here.
    pub fn connect(credential: impl Into<String>, base_url: &str) -> Result<Self, ConfigurationError> {
        let config = OpenRouterConfig::from_api_key(credential)?.with_base_url(base_url);
        Self::openrouter(config)
    }

    pub fn openrouter(config: OpenRouterConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::from_provider(ChatCompletionsClient::new(config)?))
    }

    /// Plug in any backend, e.g. a test double.
    pub fn from_provider(backend: impl CompletionProvider + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn builder(provider: HostedProvider) -> GatewayBuilder<Init> {
        GatewayBuilder::new(provider)
    }

    /// Shorthand for OpenRouter with its default endpoint.
    pub fn with_credential(credential: Credential) -> Result<Self, ConfigurationError> {
        Self::openrouter(OpenRouterConfig::new(credential))
    }

    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    /// Returns the first choice's text exactly as the provider sent it.
    pub async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.complete_detailed(request).await.map(|c| c.text)
    }

    #[tracing::instrument(
        name = "gateway_complete",
        skip(self, request),
        fields(provider = %self.backend.provider(), model = %request.model)
    )]
    pub async fn complete_detailed(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, ProviderError> {
        let result = self.run(&request).await;
        match &result {
            Ok(completion) => debug!(chars = completion.text.len(), "Completion succeeded"),
            Err(e) => warn!(error = %e, "Completion failed"),
        }
        result
    }

    /// Like [`complete`](Self::complete), but gives up with
    /// [`ProviderError::Cancelled`] as soon as `cancel` resolves. The in-flight
    /// request is dropped.
    pub async fn complete_with_cancellation<F>(
        &self,
        request: CompletionRequest,
        cancel: F,
    ) -> Result<String, ProviderError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.complete(request) => result,
            () = cancel => {
                warn!("Completion cancelled by caller");
                Err(ProviderError::Cancelled)
            }
        }
    }

    /// Synchronous entry point for callers without an async runtime.
    ///
    /// Drives the request on a private current-thread runtime. Called from a
    /// thread that is already running a tokio runtime it fails with
    /// [`ProviderError::BlockingInRuntime`] instead of blocking that runtime.
    pub fn complete_blocking(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            warn!("complete_blocking called from async context");
            return Err(ProviderError::BlockingInRuntime);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProviderError::Network {
                message: "failed to start runtime for blocking call".to_string(),
                source: Box::new(e),
            })?;
        runtime.block_on(self.complete(request))
    }

    async fn run(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        request.validate()?;

        match request.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.backend.complete(request))
                .await
                .map_err(|_| ProviderError::Timeout { timeout })?,
            None => self.backend.complete(request).await,
        }
    }
}

impl std::fmt::Debug for CompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGateway")
            .field("provider", &self.backend.provider())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::core::types::Message;

    struct CountingBackend {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait]
    impl CompletionProvider for CountingBackend {
        fn provider(&self) -> Provider {
            Provider::Custom("counting")
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(Completion {
                text: request.conversation[0].content.clone(),
                id: None,
                model: None,
                finish_reason: None,
                usage: None,
            })
        }
    }

    fn gateway(delay: Duration) -> (CompletionGateway, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = CompletionGateway::from_provider(CountingBackend {
            calls: calls.clone(),
            delay,
        });
        (gateway, calls)
    }

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new("test-model", vec![Message::user(text)])
    }

    #[test]
    fn empty_credential_fails_before_any_io() {
        let err = CompletionGateway::connect("", "https://openrouter.ai/api/v1").unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingCredential(_)));
    }

    #[test]
    fn bad_base_url_is_a_configuration_error() {
        let err = CompletionGateway::connect("sk-test", "not a url").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidBaseUrl { .. }));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_backend() {
        let (gateway, calls) = gateway(Duration::ZERO);
        let err = gateway
            .complete(request("hi").with_temperature(3.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn per_request_timeout_surfaces_as_timeout() {
        let (gateway, _) = gateway(Duration::from_secs(30));
        let err = gateway
            .complete(request("slow").with_timeout(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { timeout } if timeout == Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_wins_over_a_slow_backend() {
        let (gateway, calls) = gateway(Duration::from_secs(30));
        let err = gateway
            .complete_with_cancellation(
                request("slow"),
                tokio::time::sleep(Duration::from_millis(10)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn blocking_call_works_without_a_runtime() {
        let (gateway, calls) = gateway(Duration::ZERO);
        let text = gateway.complete_blocking(request("sync")).unwrap();
        assert_eq!(text, "sync");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blocking_call_inside_a_runtime_is_an_error() {
        let (gateway, calls) = gateway(Duration::ZERO);
        let err = gateway.complete_blocking(request("sync")).unwrap_err();
        assert!(matches!(err, ProviderError::BlockingInRuntime));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn blocking_call_from_a_plain_thread_of_an_async_program() {
        let (gateway, calls) = gateway(Duration::ZERO);
        let text = std::thread::spawn(move || gateway.complete_blocking(request("off-runtime")))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(text, "off-runtime");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gateway_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<CompletionGateway>();
    }
}
