// src/main.rs
// tonecheck - sentiment classification API

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tonecheck::config::{ClassifierArgs, ServiceConfig};
use tonecheck::web::{self, state::AppState};

#[derive(Parser)]
#[command(name = "tonecheck")]
#[command(about = "Sentiment classification API backed by a chat completion provider")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    classifier: ClassifierArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve(ServeArgs),

    /// Classify one comment and print the JSON result
    Classify {
        /// Comment text
        comment: String,
    },
}

// Parser as well as Args so a bare `tonecheck` can still resolve the
// host/port env vars and defaults
#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "TONECHECK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "TONECHECK_PORT", default_value_t = 8000)]
    port: u16,
}

async fn run_server(config: ServiceConfig, args: ServeArgs) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let model = state.classifier.model_name();
    let output_mode = state.classifier.output_mode();
    let app = web::create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(addr = %addr, model = %model, output_mode = %output_mode, "tonecheck listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn run_classify(config: ServiceConfig, comment: String) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let result = state.classifier.classify(&comment).await?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from current directory (real env vars win)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Missing credentials or a bad URL stop the process here, before serving
    let config = ServiceConfig::load(&cli.classifier)?;

    match cli.command {
        Some(Commands::Serve(args)) => run_server(config, args).await?,
        None => run_server(config, ServeArgs::try_parse_from(["tonecheck"])?).await?,
        Some(Commands::Classify { comment }) => run_classify(config, comment).await?,
    }

    Ok(())
}
