//! MindAtlas — mind-map generation and document outlining server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("MINDATLAS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = mindatlas_core::AtlasConfig::from_env(&data_dir)?;
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set — topic generation will report a configuration error");
    }
    let port = config.port;

    let state = Arc::new(
        AppState::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize state: {}", e))?,
    );

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MindAtlas server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
