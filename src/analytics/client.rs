//! HTTP client for the Analytics Data API v1beta.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{access_token, AnalyticsError, ReportResponse, ReportSource, RunRealtimeReportRequest, RunReportRequest};
use crate::config::{CredentialSource, DashboardConfig};

/// Report client bound to a single property.
pub struct GaClient {
    http: Client,
    api_base: String,
    property_id: String,
    credentials: CredentialSource,
}

impl GaClient {
    /// Create a client from explicit configuration.
    pub fn new(config: &DashboardConfig) -> Result<Self, AnalyticsError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("ga4-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            property_id: config.property_id.clone(),
            credentials: config.credentials.clone(),
        })
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    /// `{base}/v1beta/properties/{id}:{method}`
    fn method_url(&self, method: &str) -> String {
        format!("{}/v1beta/properties/{}:{}", self.api_base, self.property_id, method)
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> Result<ReportResponse, AnalyticsError> {
        let token = access_token(&self.http, &self.credentials).await?;
        let url = self.method_url(method);

        let response = self.http.post(&url).bearer_auth(token).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} for property {} failed with {}", method, self.property_id, status);
            return Err(AnalyticsError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReportSource for GaClient {
    async fn run_report(&self, request: &RunReportRequest) -> Result<ReportResponse, AnalyticsError> {
        self.call("runReport", request).await
    }

    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Result<ReportResponse, AnalyticsError> {
        self.call("runRealtimeReport", request).await
    }
}
