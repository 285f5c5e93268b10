//! # traitguard-api: Binary Entry Point
//!
//! Starts the webhook server. Binds to `PORT` (default 3000) and requires
//! `KRATOS_PUBLIC_URL` to point at the schema registry.

use traitguard_api::state::{AppConfig, AppState, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    tracing::info!(registry = %config.registry.base_url, "schema registry configured");

    let port = config.port;
    let state = AppState::new(config).map_err(|e| {
        tracing::error!("Failed to create schema registry client: {e}");
        e
    })?;

    let app = traitguard_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Webhook listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
