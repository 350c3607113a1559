//! Normalized dashboard records built from raw reports.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    safe_float, safe_int, AnalyticsError, ReportResponse, ReportSource, Row,
    RunRealtimeReportRequest, RunReportRequest,
};

/// Daily metrics for one date of the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRecord {
    pub date: String,
    pub active_users: i64,
    pub new_users: i64,
    pub sessions: i64,
    pub page_views: i64,
    /// Seconds
    pub avg_session_duration: f64,
    pub bounce_rate: f64,
    pub engagement_rate: f64,
    /// Seconds
    pub user_engagement_duration: f64,
}

impl HistoricalRecord {
    /// Display labels, in field order.
    pub const COLUMNS: [&'static str; 9] = [
        "Date",
        "Active Users",
        "New Users",
        "Sessions",
        "Page Views",
        "Avg. Session Duration (s)",
        "Bounce Rate (%)",
        "Engagement Rate (%)",
        "User Engagement (s)",
    ];

    /// Normalize one `date` report row.
    pub fn from_row(row: &Row) -> Self {
        Self {
            date: format_report_date(row.dimension(0).unwrap_or_default()),
            active_users: safe_int(row.metric(0)),
            new_users: safe_int(row.metric(1)),
            sessions: safe_int(row.metric(2)),
            page_views: safe_int(row.metric(3)),
            avg_session_duration: safe_float(row.metric(4)),
            bounce_rate: safe_float(row.metric(5)),
            engagement_rate: safe_float(row.metric(6)),
            user_engagement_duration: safe_float(row.metric(7)),
        }
    }
}

/// Active users per value of one dimension.
pub type Breakdown = BTreeMap<String, i64>;

/// Point-in-time view of who is on the site right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RealtimeSnapshot {
    pub total_active_users: i64,
    pub by_device: Breakdown,
    pub by_country: Breakdown,
    pub by_platform: Breakdown,
}

impl RealtimeSnapshot {
    /// Reduce realtime rows (deviceCategory, country, platform; activeUsers).
    pub fn from_rows(rows: &[Row]) -> Self {
        Self {
            total_active_users: rows
                .iter()
                .fold(0i64, |acc, r| acc.saturating_add(safe_int(r.metric(0)))),
            by_device: group_sum(rows, 0),
            by_country: group_sum(rows, 1),
            by_platform: group_sum(rows, 2),
        }
    }
}

/// Reformat a `YYYYMMDD` report date as `YYYY-MM-DD`.
///
/// Purely positional: nothing is validated, and short input just produces
/// a short, malformed string.
pub fn format_report_date(raw: &str) -> String {
    let year: String = raw.chars().take(4).collect();
    let month: String = raw.chars().skip(4).take(2).collect();
    let day: String = raw.chars().skip(6).collect();
    format!("{}-{}-{}", year, month, day)
}

/// Sum the first metric over rows sharing the dimension at `dimension`.
///
/// Rows missing the dimension are grouped under the empty label.
pub fn group_sum(rows: &[Row], dimension: usize) -> Breakdown {
    let mut groups = Breakdown::new();
    for row in rows {
        let key = row.dimension(dimension).unwrap_or_default().to_string();
        let total = groups.entry(key).or_insert(0);
        *total = total.saturating_add(safe_int(row.metric(0)));
    }
    groups
}

/// Normalize every row of a historical report, keeping API order.
pub fn normalize_historical(report: &ReportResponse) -> Vec<HistoricalRecord> {
    report.rows.iter().map(HistoricalRecord::from_row).collect()
}

/// Fetch the trailing 30 days of daily metrics.
pub async fn fetch_historical(source: &dyn ReportSource) -> Result<Vec<HistoricalRecord>, AnalyticsError> {
    let report = source.run_report(&RunReportRequest::historical()).await?;
    tracing::debug!(
        "Historical report returned {} rows (API row count {:?})",
        report.rows.len(),
        report.row_count
    );
    Ok(normalize_historical(&report))
}

/// Fetch the realtime active-user snapshot.
pub async fn fetch_realtime(source: &dyn ReportSource) -> Result<RealtimeSnapshot, AnalyticsError> {
    let report = source
        .run_realtime_report(&RunRealtimeReportRequest::active_users_breakdown())
        .await?;
    tracing::debug!(
        "Realtime report returned {} rows (API row count {:?})",
        report.rows.len(),
        report.row_count
    );
    Ok(RealtimeSnapshot::from_rows(&report.rows))
}
