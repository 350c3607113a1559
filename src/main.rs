//! GA4 Dashboard - Google Analytics 4 realtime and historical metrics.
//!
//! Fetches two fixed reports for one property on every page render and
//! serves them as a single-page dashboard.

mod analytics;
mod config;
mod web;

use analytics::GaClient;
use config::DashboardConfig;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("ga4_dashboard=info".parse()?))
        .init();

    // Load configuration
    let cfg = DashboardConfig::load()?;
    tracing::info!("Starting GA4 dashboard on port {}...", cfg.http_port);
    tracing::info!("Using credentials: {}", cfg.credentials.describe());

    // Build the report client
    let client = GaClient::new(&cfg)?;
    tracing::info!("Reporting on property {}", client.property_id());

    // Start web server
    let server = Server::new(cfg, Arc::new(client));
    server.start().await?;

    Ok(())
}
