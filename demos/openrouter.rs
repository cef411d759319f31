//! Example demonstrating the gateway against OpenRouter.
//!
//! This example shows how to:
//! - Load `OPENROUTER_API_KEY` from the environment (or a `.env` file)
//! - Set the OpenRouter routing headers (HTTP-Referer, X-Title)
//! - Send a multi-message conversation and read usage metadata

use dotenv::dotenv;

use llm_gateway::{ApiKey, CompletionGateway, CompletionRequest, HostedProvider, Message};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let gateway = CompletionGateway::builder(HostedProvider::OpenRouter)
        .api_key(ApiKey::Default)?
        .http_referer("https://example.com")
        .app_title("llm-gateway demo")
        .build()?;

    let request = CompletionRequest::new(
        "openai/gpt-4o-mini",
        vec![
            Message::system("Answer in one sentence."),
            Message::user("Why is the sky blue?"),
        ],
    )
    .with_temperature(0.3)
    .with_max_output_tokens(200);

    let completion = gateway.complete_detailed(request).await?;

    println!("{}", completion.text);
    if let Some(usage) = completion.usage {
        println!(
            "tokens: {} prompt + {} completion = {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(())
}
