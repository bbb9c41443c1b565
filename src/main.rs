use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;

use email_preview::config::{Overrides, Settings};
use email_preview::server::{create_app, AppState};
use email_preview::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "email-preview")]
#[command(about = "Preview themed email templates in the browser", long_about = None)]
struct Cli {
    /// Bind address as host:port
    #[arg(long)]
    addr: Option<String>,

    /// Extra settings file (toml, json, yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root with one directory per language
    #[arg(long)]
    emails: Option<PathBuf>,

    /// Theme/template catalog (JSON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory holding index.hbs and variables.hbs
    #[arg(long)]
    views: Option<PathBuf>,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Overrides {
            config_file: cli.config,
            addr: cli.addr,
            emails_dir: cli.emails,
            catalog_file: cli.catalog,
            views_dir: cli.views,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.into())?;

    // Initialize tracing
    init_telemetry(&settings.logging)?;
    tracing::info!("Configuration loaded");

    // Create application state
    let state = AppState::load(&settings).await?;
    tracing::info!(
        themes = state.catalog.theme_count(),
        languages = state.languages.len(),
        "Application state initialized"
    );

    // Create Axum app
    let app = create_app(state);

    // Start server
    let (host, port) = settings.server.host_port()?;
    tracing::debug!(addr = %settings.server_addr(), "Binding listener");
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!("Listening on http://localhost:{}", port);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
