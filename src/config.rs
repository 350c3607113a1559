//! Configuration module for the GA4 dashboard.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The property id and a credential source are required.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default Analytics Data API endpoint.
pub const DEFAULT_API_BASE: &str = "https://analyticsdata.googleapis.com";

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GA4_PROPERTY_ID is not set")]
    MissingPropertyId,
    #[error("invalid property id {0:?}: expected digits only")]
    InvalidPropertyId(String),
    #[error("no credentials: set GOOGLE_APPLICATION_CREDENTIALS or GA4_ACCESS_TOKEN")]
    MissingCredentials,
}

/// Where the client gets its bearer token from.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    /// Path to a service-account JSON key file.
    ServiceAccountFile(PathBuf),
    /// A pre-minted OAuth access token, used as-is.
    AccessToken(String),
}

impl CredentialSource {
    /// Short description that never includes the secret itself.
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::ServiceAccountFile(path) => {
                format!("service account key ({})", path.display())
            }
            CredentialSource::AccessToken(_) => "static access token".to_string(),
        }
    }
}

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// GA4 property the reports are scoped to
    pub property_id: String,
    /// Credential used to authorize report requests
    pub credentials: CredentialSource,
    /// Page title (default: "Analytics Dashboard")
    pub title: String,
    /// Analytics Data API base URL
    pub api_base: String,
    /// Per-request timeout for remote calls (default: 30s)
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Build a config with defaults for everything but the required values.
    pub fn new(property_id: impl Into<String>, credentials: CredentialSource) -> Self {
        Self {
            http_port: 8080,
            property_id: property_id.into(),
            credentials,
            title: "Analytics Dashboard".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GA4_PROPERTY_ID`: analytics property id (required)
    /// - `GOOGLE_APPLICATION_CREDENTIALS`: service-account key file path
    /// - `GA4_ACCESS_TOKEN`: bearer token, takes precedence over the key file
    /// - `GA4_DASHBOARD_HTTP_PORT`: HTTP port (default: 8080)
    /// - `GA4_DASHBOARD_TITLE`: page title
    /// - `GA4_API_BASE`: API base URL
    /// - `GA4_REQUEST_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let property_id = get("GA4_PROPERTY_ID").ok_or(ConfigError::MissingPropertyId)?;
        if !property_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidPropertyId(property_id));
        }

        let credentials = if let Some(token) = get("GA4_ACCESS_TOKEN") {
            CredentialSource::AccessToken(token)
        } else if let Some(path) = get("GOOGLE_APPLICATION_CREDENTIALS") {
            CredentialSource::ServiceAccountFile(PathBuf::from(path))
        } else {
            return Err(ConfigError::MissingCredentials);
        };

        let mut cfg = Self::new(property_id, credentials);

        if let Some(port_str) = get("GA4_DASHBOARD_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Some(title) = get("GA4_DASHBOARD_TITLE") {
            cfg.title = title;
        }

        if let Some(api_base) = get("GA4_API_BASE") {
            cfg.api_base = api_base.trim_end_matches('/').to_string();
        }

        if let Some(secs) = get("GA4_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                if secs > 0 {
                    cfg.request_timeout = Duration::from_secs(secs);
                }
            }
        }

        Ok(cfg)
    }
}
