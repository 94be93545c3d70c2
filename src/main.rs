//! A2A Summarizer entry point.

use anyhow::{Context, Result};
use tracing::info;

use a2a_summarizer::bootstrap;
use a2a_summarizer::infrastructure::config::ConfigLoader;
use a2a_summarizer::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))
        .context("Failed to initialize logging")?;

    info!(host = %config.host, port = config.port, "A2A Summarization Agent starting");

    let gateway = bootstrap::create_a2a_server(&config)
        .await
        .context("Failed to create A2A server")?;

    gateway
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("A2A Summarization Agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
