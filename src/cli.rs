//! CLI argument parsing for Pareto

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the ranked table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// No table output
    None,
}

#[derive(Parser, Debug)]
#[command(name = "pareto")]
#[command(version)]
#[command(about = "Pareto analysis of problem causes with charts and reports", long_about = None)]
pub struct Cli {
    /// Import causes from a CSV or spreadsheet file with Cause and Occurrence columns (repeatable)
    #[arg(short = 'i', long = "import", value_name = "FILE")]
    pub imports: Vec<PathBuf>,

    /// Add a cause as NAME=OCCURRENCE (repeatable)
    #[arg(short = 'a', long = "add", value_name = "NAME=OCC", value_parser = parse_cause)]
    pub adds: Vec<(String, f64)>,

    /// Remove a cause by exact name (repeatable)
    #[arg(short = 'r', long = "remove", value_name = "NAME")]
    pub removes: Vec<String>,

    /// Analysis title used for charts, reports and default file names
    #[arg(short = 't', long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Cumulative share the top causes must reach (default: 0.8)
    #[arg(long = "threshold", value_name = "SHARE")]
    pub threshold: Option<f64>,

    /// Output format for the ranked table
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the spreadsheet report (full table + chart)
    #[arg(long = "xlsx", value_name = "PATH")]
    pub xlsx: Option<PathBuf>,

    /// Write the document report (summary + top-causes chart)
    #[arg(long = "docx", value_name = "PATH")]
    pub docx: Option<PathBuf>,

    /// Write the full Pareto chart as PNG
    #[arg(long = "chart", value_name = "PATH")]
    pub chart: Option<PathBuf>,

    /// Write the top-causes chart as PNG
    #[arg(long = "top-chart", value_name = "PATH")]
    pub top_chart: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start the interactive shell after applying the other options
    #[arg(long = "interactive")]
    pub interactive: bool,

    /// Execute a single shell command and exit
    #[arg(long = "shell-command", value_name = "CMD")]
    pub shell_command: Option<String>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

/// Parse `NAME=OCCURRENCE`; the last `=` separates the two
fn parse_cause(value: &str) -> Result<(String, f64), String> {
    let (name, occurrence) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=OCCURRENCE, got '{}'", value))?;
    let occurrence: f64 = occurrence
        .trim()
        .parse()
        .map_err(|_| format!("occurrence '{}' is not a number", occurrence))?;
    Ok((name.to_string(), occurrence))
}
