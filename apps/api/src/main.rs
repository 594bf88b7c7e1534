//! Busline API server binary.
//!
//! Loads configuration from the environment, opens the database (running
//! migrations), and serves the router until Ctrl-C.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use busline_api::{app, ApiConfig};
use busline_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,busline_db=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Busline API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db = %config.database_path,
        "Configuration loaded"
    );

    // Open database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.max_connections),
    )
    .await?;
    info!("Database ready");

    // Bind and serve
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "Failed to install Ctrl-C handler");
    }
    info!("Shutdown signal received");
}
