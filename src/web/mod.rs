//! Web server module.

mod handlers;
mod page;

pub use handlers::*;

use crate::analytics::ReportSource;
use crate::config::DashboardConfig;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers. Immutable between renders.
#[derive(Clone)]
pub struct AppState {
    pub config: DashboardConfig,
    pub source: Arc<dyn ReportSource>,
}

/// Web server for the dashboard.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(config: DashboardConfig, source: Arc<dyn ReportSource>) -> Self {
        Self {
            state: AppState { config, source },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Dashboard
            .route("/", get(handlers::handle_dashboard))
            // API endpoints
            .route("/api/realtime", get(handlers::handle_realtime_api))
            .route("/api/historical", get(handlers::handle_historical_api))
            // Pages
            .route("/status", get(handlers::handle_status))
            // Static assets
            .route("/favicon.ico", get(handlers::handle_favicon))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
