//! Dashboard page rendering.
//!
//! Tables are rendered server-side; charts are emitted as JSON specs that
//! the page script hands to Chart.js.

use crate::analytics::{Breakdown, HistoricalRecord, RealtimeSnapshot};

use chrono::{DateTime, Utc};
use serde::Serialize;

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

// ============================================================================
// Chart specs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    fn bar(id: &str, label: &str, breakdown: &Breakdown) -> Self {
        Self {
            id: id.to_string(),
            kind: "bar",
            labels: breakdown.keys().cloned().collect(),
            datasets: vec![Dataset {
                label: label.to_string(),
                data: breakdown.values().map(|v| *v as f64).collect(),
            }],
        }
    }

    /// One line per `(label, accessor)` pair, indexed by date.
    fn history_lines(
        id: &str,
        history: &[HistoricalRecord],
        series: &[(&str, fn(&HistoricalRecord) -> f64)],
    ) -> Self {
        Self {
            id: id.to_string(),
            kind: "line",
            labels: history.iter().map(|r| r.date.clone()).collect(),
            datasets: series
                .iter()
                .map(|(label, value)| Dataset {
                    label: label.to_string(),
                    data: history.iter().map(|r| value(r)).collect(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// Everything the dashboard page shows for one render.
pub struct DashboardView<'a> {
    pub title: &'a str,
    pub property_id: &'a str,
    pub realtime: &'a RealtimeSnapshot,
    pub history: &'a [HistoricalRecord],
    pub generated_at: DateTime<Utc>,
}

impl DashboardView<'_> {
    /// Chart specs for every chart that has data to draw.
    pub fn charts(&self) -> Vec<ChartSpec> {
        let mut charts = Vec::new();

        if !self.realtime.by_device.is_empty() {
            charts.push(ChartSpec::bar("device-chart", "Active Users", &self.realtime.by_device));
        }
        if !self.realtime.by_platform.is_empty() {
            charts.push(ChartSpec::bar("platform-chart", "Active Users", &self.realtime.by_platform));
        }

        if !self.history.is_empty() {
            charts.push(ChartSpec::history_lines(
                "users-chart",
                self.history,
                &[
                    ("Active Users", |r| r.active_users as f64),
                    ("New Users", |r| r.new_users as f64),
                    ("Sessions", |r| r.sessions as f64),
                ],
            ));
            charts.push(ChartSpec::history_lines(
                "engagement-chart",
                self.history,
                &[
                    ("Engagement Rate (%)", |r| r.engagement_rate),
                    ("Bounce Rate (%)", |r| r.bounce_rate),
                ],
            ));
            charts.push(ChartSpec::history_lines(
                "duration-chart",
                self.history,
                &[
                    ("User Engagement (s)", |r| r.user_engagement_duration),
                    ("Avg. Session Duration (s)", |r| r.avg_session_duration),
                ],
            ));
            charts.push(ChartSpec::history_lines(
                "pageviews-chart",
                self.history,
                &[("Page Views", |r| r.page_views as f64)],
            ));
        }

        charts
    }

    /// Render the full HTML document.
    pub fn render(&self) -> String {
        let history_notice = || notice("No historical data to show.");
        let history_chart = |id: &str| {
            if self.history.is_empty() {
                history_notice()
            } else {
                canvas(id)
            }
        };

        let charts_json = serde_json::to_string(&self.charts()).unwrap_or_else(|_| "[]".to_string());

        let content = fill(
            DASHBOARD_TEMPLATE,
            &[
                ("title", escape_html(self.title)),
                ("realtime_total", self.realtime.total_active_users.to_string()),
                (
                    "device_chart",
                    breakdown_chart("device-chart", &self.realtime.by_device, "No device data to show."),
                ),
                (
                    "platform_chart",
                    breakdown_chart("platform-chart", &self.realtime.by_platform, "No platform data to show."),
                ),
                ("country_section", country_section(&self.realtime.by_country)),
                (
                    "history_table",
                    if self.history.is_empty() {
                        history_notice()
                    } else {
                        history_table(self.history)
                    },
                ),
                ("users_chart", history_chart("users-chart")),
                ("engagement_chart", history_chart("engagement-chart")),
                ("duration_chart", history_chart("duration-chart")),
                ("pageviews_chart", history_chart("pageviews-chart")),
                ("generated_at", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
                ("property_id", escape_html(self.property_id)),
                ("charts_json", escape_script_json(&charts_json)),
            ],
        );

        layout(self.title, &content)
    }
}

/// Wrap page content in the shared layout.
pub fn layout(title: &str, content: &str) -> String {
    fill(
        LAYOUT_TEMPLATE,
        &[("title", escape_html(title)), ("content", content.to_string())],
    )
}

/// Page shown when a render is aborted by a remote failure.
pub fn error_page(title: &str, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1>\n<div class=\"error\"><strong>Failed to load analytics data.</strong><br>{}</div>",
        escape_html(title),
        escape_html(message)
    );
    layout(title, &content)
}

/// Breakdown rows sorted by active users descending, then label ascending.
pub fn sorted_by_users(breakdown: &Breakdown) -> Vec<(&str, i64)> {
    let mut rows: Vec<_> = breakdown.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

fn breakdown_chart(id: &str, breakdown: &Breakdown, empty_message: &str) -> String {
    if breakdown.is_empty() {
        notice(empty_message)
    } else {
        canvas(id)
    }
}

fn country_section(by_country: &Breakdown) -> String {
    if by_country.is_empty() {
        return String::new();
    }

    let rows: String = sorted_by_users(by_country)
        .into_iter()
        .map(|(country, users)| format!("<tr><td>{}</td><td>{}</td></tr>", escape_html(country), users))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<h2>Active Users by Country</h2>\n<table>\n<tr><th>Country</th><th>Active Users</th></tr>\n{}\n</table>",
        rows
    )
}

fn history_table(history: &[HistoricalRecord]) -> String {
    let header: String = HistoricalRecord::COLUMNS
        .iter()
        .map(|c| format!("<th>{}</th>", c))
        .collect();

    let rows: String = history
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape_html(&r.date),
                r.active_users,
                r.new_users,
                r.sessions,
                r.page_views,
                r.avg_session_duration,
                r.bounce_rate,
                r.engagement_rate,
                r.user_engagement_duration
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<div class=\"scroll\"><table>\n<tr>{}</tr>\n{}\n</table></div>",
        header, rows
    )
}

fn canvas(id: &str) -> String {
    format!("<div class=\"panel\"><canvas id=\"{}\"></canvas></div>", id)
}

fn notice(message: &str) -> String {
    format!("<div class=\"notice\">{}</div>", escape_html(message))
}

// ============================================================================
// Helpers
// ============================================================================

/// Substitute `{{key}}` placeholders in a single pass.
///
/// Inserted values are never rescanned, so data that happens to contain
/// `{{...}}` stays literal. Unknown placeholders are left as-is.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make JSON safe to embed inside a `<script>` element.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c").replace('>', "\\u003e").replace('&', "\\u0026")
}
