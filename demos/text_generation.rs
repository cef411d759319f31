use dotenv::dotenv;
use llm_gateway::{CallerAdapter, CompletionGateway, Credential};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let credential = Credential::from_env("OPENROUTER_API_KEY")?;
    let gateway = CompletionGateway::with_credential(credential)?;

    let answer = CallerAdapter::new(gateway)
        .generate_completion("Summarize the plot of Hamlet in three lines.")
        .await?;

    println!("{answer}");
    Ok(())
}
