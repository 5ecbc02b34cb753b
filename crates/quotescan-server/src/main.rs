//! quotescan-server - HTTP server binary.

use std::sync::Arc;

use quotescan_core::extraction::{pdftotext, GeometryOptions};
use quotescan_core::ExtractOptions;
use quotescan_server::config::ServerConfig;
use quotescan_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("quotescan_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;

    if !pdftotext::is_available() {
        warn!("pdftotext not found on PATH; uploads will fail until poppler-utils is installed");
    }

    let source = Arc::from(config.backend.source(GeometryOptions::default()));
    let state = AppState::new(source, ExtractOptions::default());
    info!(backend = state.backend_name(), "Table source ready");

    let app = create_server(state, config.max_upload_bytes);

    let addr = config.addr()?;
    info!("Starting quotescan-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
