//! CNC Maintenance Service - Main Entry Point
//!
//! Usage: `cnc-maintenance [CONFIG_FILE]`

use api::{init_logging, install_metrics, run_server, AppState, Settings};
use datasets::Datasets;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref())?;
    init_logging(&settings.logging)?;

    info!("=== CNC Maintenance Service v{} ===", env!("CARGO_PKG_VERSION"));

    // Every table must load before any query is accepted
    let datasets = match Datasets::load(&settings.datasets).await {
        Ok(datasets) => Arc::new(datasets),
        Err(e) => {
            error!("Cannot start without datasets: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(datasets, settings.preview).with_metrics(install_metrics()?);
    run_server(&settings, state).await?;

    Ok(())
}
