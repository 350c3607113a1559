//! Analytics module: GA4 Data API access and record normalization.
//!
//! Transport lives behind the [`ReportSource`] trait so the normalization
//! in `metrics` can run against any report producer.

mod auth;
mod client;
mod coerce;
mod metrics;
mod report;

pub use auth::*;
pub use client::*;
pub use coerce::*;
pub use metrics::*;
pub use report::*;

use async_trait::async_trait;
use thiserror::Error;

/// Analytics error types.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("credential error: {0}")]
    Credentials(String),
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Something that can answer the two report requests.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Run a historical report over a date range.
    async fn run_report(&self, request: &RunReportRequest) -> Result<ReportResponse, AnalyticsError>;

    /// Run a realtime report.
    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Result<ReportResponse, AnalyticsError>;
}
