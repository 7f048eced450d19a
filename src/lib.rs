//! Pareto - cause frequency analysis with charts and reports
//!
//! This library ranks problem causes by occurrence, computes each cause's
//! share and cumulative share, selects the top causes that reach a threshold
//! (80% by default), renders Pareto charts, and exports spreadsheet and
//! document reports.

pub mod analysis;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dataset;
pub mod docx_output;
pub mod error;
pub mod export;
pub mod import;
pub mod json_output;
pub mod session;
pub mod shell;
pub mod text_output;
pub mod xlsx_output;

pub use analysis::{ParetoAnalysis, ParetoRow, ReportSummary};
pub use dataset::{CauseRecord, Dataset};
pub use error::{ParetoError, Result};
pub use session::Session;
