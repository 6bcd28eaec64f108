//! AI layer service entry point.
//!
//! ```text
//!   .env / environment ──▶ Settings ─────────────┐
//!   --config file ───────▶ ServiceConfig ─┐      │
//!                                         ▼      ▼
//!                          LoggerRegistry   HttpServer ──▶ /ping, /llm/*
//!                          (stdout + log/project.log)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use ai_layer::config::{load_or_default, Settings};
use ai_layer::http::HttpServer;
use ai_layer::lifecycle::{shutdown_signal, startup, Shutdown};
use ai_layer::observability::logging::LoggerRegistry;

#[derive(Parser)]
#[command(name = "ai-layer")]
#[command(about = "AI layer HTTP service", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = Settings::load();
    let config = load_or_default(cli.config.as_deref())?;

    let loggers = Arc::new(LoggerRegistry::new());
    let logger = startup::init_logging(&loggers, &config.logging)?;

    tracing::info!("ai-layer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        log_file = %logger.log_path().display(),
        "Configuration loaded"
    );
    tracing::debug!(?settings, "Settings loaded");

    startup::init_metrics(&config.observability);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, settings);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    // Explicit, opt-in teardown: flush and close every file sink.
    loggers.release_all()?;
    Ok(())
}
