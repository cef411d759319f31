use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use llm_gateway::{ApiKey, CallerAdapter, CompletionGateway, HostedProvider, Message, Prompt};

/// Send one prompt through the gateway and print the completion.
#[derive(Parser, Debug)]
#[command(name = "llm-gateway", version, about)]
struct Cli {
    /// Prompt text sent as a single user message.
    #[arg(default_value = "What is the meaning of life?")]
    prompt: String,

    /// Optional system message placed before the prompt.
    #[arg(long)]
    system: Option<String>,

    #[arg(long, env = "LLM_GATEWAY_MODEL", default_value = "deepseek/deepseek-r1:free")]
    model: String,

    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    #[arg(long = "max-tokens", default_value_t = 2000)]
    max_tokens: u32,

    /// Override the provider endpoint, e.g. a local OpenAI-compatible server.
    #[arg(long, env = "OPENROUTER_BASE_URL")]
    base_url: Option<String>,

    /// Value for the HTTP-Referer routing header.
    #[arg(long)]
    referer: Option<String>,

    /// Value for the X-Title routing header.
    #[arg(long)]
    title: Option<String>,

    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Whole-request timeout in seconds.
    #[arg(long = "timeout-secs", default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("llm_gateway=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut builder = CompletionGateway::builder(HostedProvider::OpenRouter)
        .api_key(ApiKey::Default)?
        .timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(base_url) = cli.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(referer) = cli.referer {
        builder = builder.http_referer(referer);
    }
    if let Some(title) = cli.title {
        builder = builder.app_title(title);
    }
    if let Some(user_agent) = cli.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let gateway = builder.build()?;

    let prompt = match cli.system {
        Some(system) => Prompt::Conversation(vec![Message::system(system), Message::user(cli.prompt)]),
        None => Prompt::Text(cli.prompt),
    };

    let adapter = CallerAdapter::new(gateway)
        .with_model(cli.model)
        .with_temperature(cli.temperature)
        .with_max_output_tokens(cli.max_tokens);

    tracing::info!(model = adapter.model(), "Sending prompt");
    let answer = adapter.generate_completion(prompt).await?;
    println!("{answer}");

    Ok(())
}
