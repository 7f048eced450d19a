//! JSON output format for Pareto analyses

use crate::analysis::{ParetoAnalysis, ParetoRow, ReportSummary};
use serde::{Deserialize, Serialize};

/// A ranked cause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCause {
    /// Cause name
    pub name: String,
    /// Occurrence count
    pub occurrence: f64,
    /// Share of the total (0.0 to 1.0)
    pub share: f64,
    /// Running share in ranked order (0.0 to 1.0)
    pub cumulative_share: f64,
    /// Whether the cause belongs to the top causes
    pub top: bool,
}

/// Headline figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total_causes: usize,
    pub top_count: usize,
    /// Percentage of occurrences covered by the top causes (0-100)
    pub coverage_percent: f64,
    pub total_occurrence: f64,
    pub threshold: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Analysis title
    pub title: String,
    /// Causes in ranked order
    pub causes: Vec<JsonCause>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    pub fn new(analysis: &ParetoAnalysis, title: &str) -> Self {
        let causes = analysis
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| JsonCause::from_row(row, analysis.is_top(i)))
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "pareto-json-v1".to_string(),
            title: title.to_string(),
            causes,
            summary: analysis.summary().into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl JsonCause {
    fn from_row(row: &ParetoRow, top: bool) -> Self {
        Self {
            name: row.name.clone(),
            occurrence: row.occurrence,
            share: row.share,
            cumulative_share: row.cumulative_share,
            top,
        }
    }
}

impl From<ReportSummary> for JsonSummary {
    fn from(s: ReportSummary) -> Self {
        Self {
            total_causes: s.total_causes,
            top_count: s.top_count,
            coverage_percent: s.coverage_percent,
            total_occurrence: s.total_occurrence,
            threshold: s.threshold,
        }
    }
}
