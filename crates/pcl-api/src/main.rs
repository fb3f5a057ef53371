//! # pcl-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the postal code lookup API.
//! Reads configuration from the environment (and `.env`, if present).

use pcl_api::state::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal in production.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default());

    if let Ok(path) = &dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = config.map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    let addr = config.host_addr;
    let state = pcl_api::bootstrap::bootstrap(config).await.map_err(|e| {
        tracing::error!("Bootstrap failed: {e}");
        e
    })?;

    let app = pcl_api::app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Postal code lookup API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Initialize structured tracing. `RUST_LOG` overrides the default `info` filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Resolves on Ctrl-C so in-flight requests can finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
