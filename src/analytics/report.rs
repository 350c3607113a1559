//! Wire types for the Analytics Data API v1beta report methods.

use serde::{Deserialize, Serialize};

/// Metrics requested by the historical report, in column order.
pub const HISTORICAL_METRICS: [&str; 8] = [
    "activeUsers",
    "newUsers",
    "sessions",
    "screenPageViews",
    "averageSessionDuration",
    "bounceRate",
    "engagementRate",
    "userEngagementDuration",
];

/// Dimensions requested by the realtime report, in column order.
pub const REALTIME_DIMENSIONS: [&str; 3] = ["deviceCategory", "country", "platform"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Body of `properties/{id}:runReport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    pub date_ranges: Vec<DateRange>,
}

impl RunReportRequest {
    /// Daily totals for the trailing 30 days through today.
    pub fn historical() -> Self {
        Self {
            dimensions: vec![Dimension { name: "date".to_string() }],
            metrics: HISTORICAL_METRICS
                .iter()
                .map(|name| Metric { name: name.to_string() })
                .collect(),
            date_ranges: vec![DateRange {
                start_date: "30daysAgo".to_string(),
                end_date: "today".to_string(),
            }],
        }
    }
}

/// Body of `properties/{id}:runRealtimeReport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRealtimeReportRequest {
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
}

impl RunRealtimeReportRequest {
    /// Active users broken down by device, country and platform.
    pub fn active_users_breakdown() -> Self {
        Self {
            dimensions: REALTIME_DIMENSIONS
                .iter()
                .map(|name| Dimension { name: name.to_string() })
                .collect(),
            metrics: vec![Metric { name: "activeUsers".to_string() }],
        }
    }
}

/// A single cell. The API omits `value` when there is nothing to report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<ReportValue>,
    #[serde(default)]
    pub metric_values: Vec<ReportValue>,
}

impl Row {
    /// Dimension value at `index`, if present.
    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimension_values.get(index).and_then(|v| v.value.as_deref())
    }

    /// Metric value at `index`, if present.
    pub fn metric(&self, index: usize) -> Option<&str> {
        self.metric_values.get(index).and_then(|v| v.value.as_deref())
    }
}

/// Response shared by both report methods. Only rows are consumed;
/// headers and metadata are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub row_count: Option<i64>,
}

impl ReportResponse {
    /// Build a response from plain string cells.
    #[cfg(test)]
    pub fn from_cells(rows: Vec<(Vec<&str>, Vec<&str>)>) -> Self {
        fn to_values(cells: Vec<&str>) -> Vec<ReportValue> {
            cells
                .into_iter()
                .map(|c| ReportValue { value: Some(c.to_string()) })
                .collect()
        }

        let row_count = Some(rows.len() as i64);
        Self {
            rows: rows
                .into_iter()
                .map(|(dims, mets)| Row {
                    dimension_values: to_values(dims),
                    metric_values: to_values(mets),
                })
                .collect(),
            row_count,
        }
    }
}
