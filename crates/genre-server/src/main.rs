mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = Config::from_env()?;
    info!(
        "Loading model artifacts: {}, {}",
        config.artifacts.pipeline.display(),
        config.artifacts.encoder.display()
    );

    let state = AppState::initialize(&config).map_err(|e| {
        error!("Startup aborted: {}", e);
        e
    })?;
    let app = routes::router(Arc::new(state));

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
