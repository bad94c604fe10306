//! Render-boundary model structs.
//!
//! All structs derive `Serialize` so a rendering front-end (browser chart
//! layer, TUI, or the CLI's `--json` mode) can consume them as JSON.

use climo_stats::SummaryStats;
use serde::Serialize;

/// A single (year, value) pair used for histogram and table rows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearValue {
    pub year: i32,
    pub value: f32,
}

/// The present values of one fixed 20-year bucket, for grouped-density charts
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BucketSeries {
    /// Bucket label, e.g. "1990-2009"
    pub label: String,
    pub values: Vec<f32>,
}

/// Everything the rendering layer needs for one dashboard pass.
///
/// A pure function of the request inputs and the cached pipeline outputs;
/// charting mechanics are entirely the consumer's concern.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    /// Chart title, e.g. "DENVER INTL (DEN) Max Temperature for Aug 6"
    pub title: String,
    pub stats: SummaryStats,
    /// Per-year values in chronological order
    pub histogram_series: Vec<YearValue>,
    /// Values grouped by 20-year bucket (empty buckets omitted)
    pub density_series: Vec<BucketSeries>,
    /// Per-year values sorted by value descending
    pub table_series: Vec<YearValue>,
    /// Human-readable summary sentence for the info panel
    pub info_text: String,
}
