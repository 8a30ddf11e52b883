//! Main entry point for the Brandcast web dashboard.

use anyhow::Context;
use brandcast_common::init_logging;
use brandcast_config::ConfigLoader;
use brandcast_engine::BrandEngine;
use brandcast_web::{serve, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(config.logging.to_logging_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("Starting Brandcast web dashboard v{}", env!("CARGO_PKG_VERSION"));

    let engine = BrandEngine::from_config(config).context("Failed to prepare analysis engine")?;
    let state = AppState::new(engine)?;
    serve(state).await
}
