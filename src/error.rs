//! Error types shared by every Pareto operation

use thiserror::Error;

/// Errors raised by dataset mutation, analysis, import and export
#[derive(Error, Debug)]
pub enum ParetoError {
    /// Rejected input: empty or duplicate name, bad number, missing column
    #[error("Validation error: {0}")]
    Validation(String),

    /// Analysis, charting or export requested on a dataset with no causes
    #[error("No causes to analyze: add or import at least one cause first")]
    EmptyDataset,

    #[error("Import failed for {path}: {message}")]
    Import { path: String, message: String },

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParetoError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ParetoError::Validation(message.into())
    }

    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, ParetoError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ParetoError>;
