//! # Berliner
//!
//! Entry point that prepares the backend core:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and schema migrations
//! - API service wiring

use anyhow::Result;
use tracing::info;

use berliner::config::Settings;
use berliner::startup::Application;
use berliner::telemetry::{self, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    telemetry::init_tracing(LogFormat::from_env());

    info!("Starting Berliner...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.database.host,
        database = %settings.database.name,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;
    info!("Database schema is up to date and the API service is ready");

    application.shutdown().await;

    Ok(())
}
