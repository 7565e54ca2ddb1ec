//! reagent - CLI entry point.
//!
//! Answers a single question from the command line with the ReAct loop.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use reagent::{Agent, Config, OpenAiClient, PromptTemplate, ToolRegistry, WebSearch};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reagent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let llm = Arc::new(
        OpenAiClient::new(config.api_key.clone(), config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_streaming(true),
    );

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(WebSearch));

    let template = match &config.prompt_path {
        Some(path) => PromptTemplate::from_file(path)?,
        None => PromptTemplate::default(),
    };

    let mut agent = Agent::new(llm, tools, template).with_max_steps(config.max_steps);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let question = if args.is_empty() {
        "What is Google's latest phone, and what are its main selling points?".to_string()
    } else {
        args.join(" ")
    };

    match agent.run(&question).await {
        Some(answer) => {
            println!("{}", answer);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No answer produced.");
            Ok(ExitCode::FAILURE)
        }
    }
}
