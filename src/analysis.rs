//! Pareto computation and top-cause selection
//!
//! Causes are ranked by occurrence (descending, stable), each one gets its
//! share of the total and the running cumulative share. The "top causes" are
//! the shortest prefix whose cumulative share reaches the threshold
//! (conventionally 80%).
//!
//! # Example
//! ```
//! use pareto::analysis::ParetoAnalysis;
//! use pareto::dataset::Dataset;
//!
//! let ds = Dataset::from_pairs(&[("A", 50.0), ("B", 30.0), ("C", 15.0), ("D", 5.0)]).unwrap();
//! let analysis = ParetoAnalysis::compute(ds.records(), 0.8).unwrap();
//! assert_eq!(analysis.top_count(), 2);
//! ```

use crate::dataset::CauseRecord;
use crate::error::{ParetoError, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// Conventional Pareto threshold (80/20 rule)
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Slack applied when comparing a cumulative share with the threshold
const THRESHOLD_EPSILON: f64 = 1e-9;

/// One ranked cause with its share of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRow {
    pub name: String,
    pub occurrence: f64,
    pub share: f64,
    pub cumulative_share: f64,
}

/// Headline figures for reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_causes: usize,
    pub top_count: usize,
    pub coverage_percent: f64,
    pub total_occurrence: f64,
    pub threshold: f64,
}

/// Result of a Pareto analysis over a non-empty dataset
#[derive(Debug, Clone, Serialize)]
pub struct ParetoAnalysis {
    rows: Vec<ParetoRow>,
    total: f64,
    threshold: f64,
    top_count: usize,
}

impl ParetoAnalysis {
    /// Rank causes and compute shares
    ///
    /// When every occurrence is zero all shares are reported as 0.0 and the
    /// top-cause count falls back to 1.
    pub fn compute(records: &[CauseRecord], threshold: f64) -> Result<Self> {
        if records.is_empty() {
            return Err(ParetoError::EmptyDataset);
        }
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ParetoError::validation(format!(
                "threshold must be in (0, 1], got {}",
                threshold
            )));
        }

        let mut sorted: Vec<&CauseRecord> = records.iter().collect();
        // sort_by is stable: ties keep insertion order, and 0.0 ties -0.0
        sorted.sort_by(|a, b| {
            b.occurrence
                .partial_cmp(&a.occurrence)
                .unwrap_or(Ordering::Equal)
        });

        let total: f64 = sorted.iter().map(|r| r.occurrence).sum();
        let mut cumulative = 0.0;
        let mut rows: Vec<ParetoRow> = sorted
            .iter()
            .map(|r| {
                let share = if total > 0.0 { r.occurrence / total } else { 0.0 };
                cumulative += share;
                ParetoRow {
                    name: r.name.clone(),
                    occurrence: r.occurrence,
                    share,
                    // rounding can overshoot before the last row is pinned
                    cumulative_share: cumulative.min(1.0),
                }
            })
            .collect();

        if total > 0.0 {
            if let Some(last) = rows.last_mut() {
                last.cumulative_share = 1.0;
            }
        }

        let cumulative: Vec<f64> = rows.iter().map(|r| r.cumulative_share).collect();
        let top_count = select_top_count(&cumulative, threshold);

        tracing::debug!(
            causes = rows.len(),
            total,
            top_count,
            "computed pareto analysis"
        );

        Ok(Self {
            rows,
            total,
            threshold,
            top_count,
        })
    }

    pub fn rows(&self) -> &[ParetoRow] {
        &self.rows
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn top_count(&self) -> usize {
        self.top_count
    }

    /// Leading rows up to the threshold; cumulative share stays relative to
    /// the global total
    pub fn top_rows(&self) -> &[ParetoRow] {
        &self.rows[..self.top_count]
    }

    pub fn is_top(&self, index: usize) -> bool {
        index < self.top_count
    }

    /// Percentage of all occurrences covered by the top causes
    pub fn coverage_percent(&self) -> f64 {
        self.rows[self.top_count - 1].cumulative_share * 100.0
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            total_causes: self.rows.len(),
            top_count: self.top_count,
            coverage_percent: self.coverage_percent(),
            total_occurrence: self.total,
            threshold: self.threshold,
        }
    }
}

/// Smallest count `k` with `cumulative[k-1] >= threshold`, never below 1
///
/// Returns 1 when no entry reaches the threshold or the slice is empty.
pub fn select_top_count(cumulative: &[f64], threshold: f64) -> usize {
    cumulative
        .iter()
        .position(|&c| c + THRESHOLD_EPSILON >= threshold)
        .map(|i| i + 1)
        .unwrap_or(1)
}
