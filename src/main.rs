//! Flight Delay Prediction Service - Main Entry Point
//!
//! Loads configuration, guarantees a trained model exists (loading the
//! persisted artifact or training from the bundled dataset), then serves
//! predictions over HTTP.

use anyhow::Result;
use flight_delay_service::{api, config::AppConfig, models::ModelService};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting Flight Delay Prediction Service");
    info!(
        artifact = %config.model.artifact_path,
        dataset = %config.model.training_data_path,
        iterations = config.model.iterations,
        "Configuration loaded successfully"
    );

    // Initialize the model service and run the one-shot gate before
    // accepting connections: cold-start training cost lands here, not on
    // the first caller.
    let service = Arc::new(ModelService::new(&config.model));
    let warm = service.clone();
    tokio::task::spawn_blocking(move || warm.warm_up()).await??;
    info!("Model ready");

    let app = api::router(service);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
