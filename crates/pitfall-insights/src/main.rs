mod config;
mod dataset;
mod error;
mod http;
mod model;
mod server;
mod service;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::PitfallInsightsServer;
use service::InsightService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting pitfall-insights");

    let config = Config::from_env()?;
    info!(
        dataset_path = %config.dataset_path().display(),
        http = config.http_listen_addr.as_deref().unwrap_or("disabled"),
        candidate_tags = config.candidate_tags.len(),
        "configuration loaded"
    );

    let service = InsightService::from_config(&config)?;

    if let Some(addr) = config.http_listen_addr.as_deref() {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "REST API ready");
        axum::serve(listener, http::router(service)).await?;
        info!("REST API shut down");
        return Ok(());
    }

    info!("MCP server ready, serving on stdio");
    let running = PitfallInsightsServer::new(service)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;

    running.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
