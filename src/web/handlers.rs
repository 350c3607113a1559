//! HTTP request handlers.

use super::page::{error_page, escape_html, fill, layout, DashboardView};
use super::AppState;
use crate::analytics::{fetch_historical, fetch_realtime, AnalyticsError};

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Utc;

const STATUS_TEMPLATE: &str = include_str!("templates/status.html");

// ============================================================================
// Dashboard
// ============================================================================

/// Fetch both reports in order and render the page. A remote failure aborts
/// the render with a 500.
pub async fn handle_dashboard(State(state): State<AppState>) -> Response {
    let realtime = match fetch_realtime(state.source.as_ref()).await {
        Ok(r) => r,
        Err(e) => return render_failure(&state, "realtime", e),
    };

    let history = match fetch_historical(state.source.as_ref()).await {
        Ok(h) => h,
        Err(e) => return render_failure(&state, "historical", e),
    };

    tracing::info!(
        "Rendered dashboard: {} active now, {} days of history",
        realtime.total_active_users,
        history.len()
    );

    let view = DashboardView {
        title: &state.config.title,
        property_id: &state.config.property_id,
        realtime: &realtime,
        history: &history,
        generated_at: Utc::now(),
    };

    Html(view.render()).into_response()
}

fn render_failure(state: &AppState, report: &str, err: AnalyticsError) -> Response {
    tracing::error!("Failed to fetch {} report: {}", report, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(error_page(&state.config.title, &err.to_string())),
    )
        .into_response()
}

// ============================================================================
// API
// ============================================================================

pub async fn handle_realtime_api(State(state): State<AppState>) -> impl IntoResponse {
    match fetch_realtime(state.source.as_ref()).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch realtime report: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

pub async fn handle_historical_api(State(state): State<AppState>) -> impl IntoResponse {
    match fetch_historical(state.source.as_ref()).await {
        Ok(history) => Json(history).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch historical report: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

pub async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    let cfg = &state.config;

    let content = fill(
        STATUS_TEMPLATE,
        &[
            ("property_id", escape_html(&cfg.property_id)),
            ("credentials", escape_html(&cfg.credentials.describe())),
            ("api_base", escape_html(&cfg.api_base)),
            ("timeout", cfg.request_timeout.as_secs().to_string()),
        ],
    );

    Html(layout(&format!("{} - Status", cfg.title), &content))
}

// ============================================================================
// Static Assets
// ============================================================================

pub async fn handle_favicon() -> impl IntoResponse {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <rect x="5" y="5" width="90" height="90" rx="18" fill="#f9ab00"/>
        <rect x="22" y="55" width="14" height="28" rx="4" fill="white"/>
        <rect x="43" y="38" width="14" height="45" rx="4" fill="white"/>
        <rect x="64" y="18" width="14" height="65" rx="4" fill="white"/>
    </svg>"##;

    (
        [(axum::http::header::CONTENT_TYPE, "image/svg+xml")],
        svg
    )
}
