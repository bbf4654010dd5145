//! Credit Risk Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, install_metrics, load_config, run_server};
use risk_assessment::AssessmentContext;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("RISK_CONFIG").map(PathBuf::from);
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_logging(&config.logging).context("failed to initialize logging")?;

    info!("=== Credit Risk Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Artifacts: encoders={}, scaler={}, model={}",
        config.artifacts.encoders.display(),
        config.artifacts.scaler.display(),
        config.artifacts.model.display()
    );

    let context = AssessmentContext::load(&config.artifacts, config.validation.clone())
        .context("failed to load model artifacts")?;
    let metrics = install_metrics()?;

    run_server(config, context, Some(metrics)).await?;

    Ok(())
}
