//! # planboard-viz
//!
//! Chart specifications for the per-store weekly gross-margin view.
//!
//! The spec is renderer-agnostic JSON in Chart.js vocabulary: a bar
//! dataset for GM dollars against the left axis and a line dataset for
//! GM percent against the right axis, one label per week. It can be
//! shipped to a frontend as-is or rendered as a standalone HTML page.

use planboard_aggregate::{MarginBand, WeeklyMargin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from chart serialization
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Chart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VizError>;

/// Bar color for the GM-dollars dataset.
const GM_DOLLARS_COLOR: &str = "#3b82f6";
/// Line color for the GM-percent dataset.
const GM_PERCENT_COLOR: &str = "#f97316";

/// Chart specification for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// How a dataset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Bar,
    Line,
}

/// Which vertical axis a dataset is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Left,
    Right,
}

/// Chart data: shared labels plus one or more datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A dataset in a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub kind: DatasetKind,
    pub axis: Axis,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Chart rendering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_label: Option<String>,
    pub show_legend: bool,
}

/// Cell/background color for a gross-margin severity band.
#[must_use]
pub fn band_color(band: MarginBand) -> &'static str {
    match band {
        MarginBand::Good => "#469f4d",
        MarginBand::Fair => "#fbb524",
        MarginBand::Warn => "#fb923c",
        MarginBand::Poor => "#fba3a3",
    }
}

/// Build the combined GM-dollars / GM-percent chart for one store.
///
/// Weeks are sorted numerically when their labels parse as week numbers
/// ("3", "W03"); non-numeric labels sort after them, lexically.
#[must_use]
pub fn margin_chart(store_label: &str, series: &[WeeklyMargin]) -> ChartSpec {
    let mut points: Vec<&WeeklyMargin> = series.iter().collect();
    points.sort_by(|a, b| match (week_number(&a.week), week_number(&b.week)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.week.cmp(&b.week),
    });

    ChartSpec {
        title: format!("Gross Margin - {store_label}"),
        data: ChartData {
            labels: points.iter().map(|m| m.week.clone()).collect(),
            datasets: vec![
                Dataset {
                    label: "GM Dollars".to_string(),
                    kind: DatasetKind::Bar,
                    axis: Axis::Left,
                    data: points.iter().map(|m| m.gm_dollars).collect(),
                    color: Some(GM_DOLLARS_COLOR.to_string()),
                },
                Dataset {
                    label: "GM %".to_string(),
                    kind: DatasetKind::Line,
                    axis: Axis::Right,
                    data: points.iter().map(|m| m.gm_percent).collect(),
                    color: Some(GM_PERCENT_COLOR.to_string()),
                },
            ],
        },
        options: ChartOptions {
            subtitle: None,
            x_axis_label: Some("Week".to_string()),
            show_legend: true,
        },
    }
}

fn week_number(label: &str) -> Option<u32> {
    label
        .trim()
        .trim_start_matches(['W', 'w'])
        .parse::<u32>()
        .ok()
}

/// Escape HTML special characters to prevent XSS.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl ChartSpec {
    /// Convert to JSON string for IPC/frontend rendering.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Generate HTML with embedded Chart.js.
    #[must_use]
    pub fn to_html(&self) -> String {
        // Escape title for HTML context and JSON for script context
        let title = escape_html(&self.title);
        let json = serde_json::to_string(&self)
            .unwrap_or_default()
            .replace("</", "<\\/"); // Prevent script tag breakout

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
    <canvas id="chart"></canvas>
    <script>
        const spec = {json};
        const ctx = document.getElementById('chart').getContext('2d');
        new Chart(ctx, {{
            type: 'bar',
            data: {{
                labels: spec.data.labels,
                datasets: spec.data.datasets.map(ds => ({{
                    type: ds.kind,
                    label: ds.label,
                    data: ds.data,
                    backgroundColor: ds.color,
                    borderColor: ds.color,
                    yAxisID: ds.axis
                }}))
            }},
            options: {{
                responsive: true,
                scales: {{
                    left: {{ type: 'linear', position: 'left' }},
                    right: {{ type: 'linear', position: 'right', grid: {{ drawOnChartArea: false }} }}
                }},
                plugins: {{
                    title: {{
                        display: true,
                        text: spec.title
                    }},
                    legend: {{
                        display: spec.options.show_legend
                    }}
                }}
            }}
        }});
    </script>
</body>
</html>"#,
            title = title,
            json = json,
        )
    }
}
