use std::io::{self, Write};
use std::sync::Arc;

use ai_llm_service::telemetry;
use anyhow::{Context, Result};
use api::core::app_state::AppState;
use clap::{Args, Parser, Subcommand};
use contextor::prompt::ASSISTANT_NAME;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "guide-ai-backend")]
#[command(about = "Sikkim travel-guide chatbot grounded in a Q/A knowledge file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Used when no subcommand is given.
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve(ServeArgs),
    /// Chat in the terminal
    Repl,
}

#[derive(Args, Debug, PartialEq)]
struct ServeArgs {
    /// Listen address
    #[arg(long, env = "API_ADDRESS", default_value = "0.0.0.0:5000")]
    address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    let state = AppState::from_env()
        .await
        .context("failed to initialise the assistant")?;

    match cli.command {
        Some(Commands::Serve(args)) => serve(state, &args.address).await,
        None => serve(state, &cli.serve.address).await,
        Some(Commands::Repl) => repl(state).await,
    }
}

fn init_tracing() {
    let filter = telemetry::env_filter_with_level("info", Level::INFO);

    let app_layer = fmt::layer()
        .with_target(true)
        .with_filter(filter::filter_fn(|meta| {
            !telemetry::is_library_event(meta.target())
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .init();
}

async fn serve(state: AppState, address: &str) -> Result<()> {
    api::start(Arc::new(state), address)
        .await
        .with_context(|| format!("HTTP server on {address} failed"))
}

/// Terminal chat until EOF or `exit`.
async fn repl(state: AppState) -> Result<()> {
    let mut assistant = state.assistant.into_inner();

    println!("Welcome to {ASSISTANT_NAME}, your Sikkim travel guide. Type 'exit' to quit.");

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        if n == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            println!("{ASSISTANT_NAME}: Safe travels, my friend!");
            break;
        }

        match assistant.generate_response(line).await {
            Ok(reply) => println!("{ASSISTANT_NAME}: {reply}"),
            Err(e) => println!("⚠️ Error: {e}"),
        }
    }
    Ok(())
}
