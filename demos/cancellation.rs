//! Bounding a completion by a deadline and by Ctrl-C.

use std::time::Duration;

use dotenv::dotenv;
use llm_gateway::{
    ApiKey, CompletionGateway, CompletionRequest, HostedProvider, ProviderError, normalize,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let gateway = CompletionGateway::builder(HostedProvider::OpenRouter)
        .api_key(ApiKey::Default)?
        .build()?;

    let request = CompletionRequest::new(
        "deepseek/deepseek-r1:free",
        normalize("Write a long essay about the history of typography."),
    )
    .with_timeout(Duration::from_secs(20));

    let cancel = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    match gateway.complete_with_cancellation(request, cancel).await {
        Ok(text) => println!("{text}"),
        Err(ProviderError::Cancelled) => eprintln!("cancelled"),
        Err(ProviderError::Timeout { timeout }) => eprintln!("gave up after {timeout:?}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
