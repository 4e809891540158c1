use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidinfo_extractor::{ExtractorConfig, YtDlp};
use vidinfo_server::config::ServerConfig;
use vidinfo_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let extractor_config = ExtractorConfig::from_env();
    info!(
        tool = %extractor_config.ytdlp_path.display(),
        timeout = ?extractor_config.timeout,
        "extractor configured"
    );
    let source = Arc::new(YtDlp::new(extractor_config));

    let server_config = ServerConfig::from_env();
    info!(
        template = %server_config.template_path.display(),
        static_dir = %server_config.static_dir.display(),
        "server configured"
    );

    let app = vidinfo_server::routes::build_router(AppState::new(source, &server_config));

    let listener = tokio::net::TcpListener::bind(&server_config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %server_config.bind, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
