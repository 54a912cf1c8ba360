//! MegaHR API server binary

use anyhow::Context;
use megahr_api::{app, telemetry, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log_filter);

    if config.is_production() && config.jwt_secret.len() < 32 {
        tracing::warn!("jwt_secret is shorter than 32 bytes in production");
    }

    let addr = config.socket_addr()?;
    let environment = config.environment;
    let state = AppState::new(config).context("failed to initialise services")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, ?environment, "MegaHR API listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
