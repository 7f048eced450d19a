//! Configuration for analysis, charts and exports
//!
//! Values come from an optional TOML file (`--config`) and are then
//! overridden by command-line flags. Every section has a `Default`, so a file
//! only needs the keys it changes:
//!
//! ```toml
//! title = "Line 3 stoppages"
//! threshold = 0.75
//!
//! [chart]
//! font_path = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
//!
//! [export]
//! highlight_color = "FFEB9C"
//! ```

use crate::analysis::DEFAULT_THRESHOLD;
use crate::error::{ParetoError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Chart side length limits in pixels
const MIN_CHART_SIDE: u32 = 100;
const MAX_CHART_SIDE: u32 = 10_000;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParetoConfig {
    /// Analysis title used for chart captions, sheet title and file names
    pub title: String,

    /// Cumulative share the top causes must reach
    pub threshold: f64,

    pub chart: ChartConfig,

    pub export: ExportConfig,
}

/// Chart rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Full chart size in pixels
    pub width: u32,
    pub height: u32,

    /// Top-causes chart size in pixels
    pub top_width: u32,
    pub top_height: u32,

    /// TrueType font for captions and labels; common system fonts are tried
    /// when unset
    ///
    /// The font is registered by the first chart rendered in the process.
    /// Later charts reuse it even if their configuration names another file.
    pub font_path: Option<PathBuf>,
}

/// Spreadsheet and document export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Worksheet name
    pub sheet_name: String,

    /// RGB hex fill for the top-cause rows
    pub highlight_color: String,

    /// Cell the full chart is anchored at
    pub image_anchor: String,

    /// Width of the chart in the document report
    pub document_image_width_inches: f64,
}

impl Default for ParetoConfig {
    fn default() -> Self {
        Self {
            title: "Pareto analysis".to_string(),
            threshold: DEFAULT_THRESHOLD,
            chart: ChartConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            top_width: 800,
            top_height: 400,
            font_path: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Pareto".to_string(),
            highlight_color: "FFC7CE".to_string(),
            image_anchor: "F3".to_string(),
            document_image_width_inches: 6.0,
        }
    }
}

impl ParetoConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ParetoConfig = toml::from_str(&text)
            .map_err(|e| ParetoError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(ParetoError::Config)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(format!(
                "threshold must be in (0, 1], got {}",
                self.threshold
            ));
        }

        let side = MIN_CHART_SIDE..=MAX_CHART_SIDE;
        if !side.contains(&self.chart.width) || !side.contains(&self.chart.height) {
            return Err(format!(
                "chart size must be between {min}x{min} and {max}x{max}, got {}x{}",
                self.chart.width,
                self.chart.height,
                min = MIN_CHART_SIDE,
                max = MAX_CHART_SIDE
            ));
        }

        if !side.contains(&self.chart.top_width) || !side.contains(&self.chart.top_height) {
            return Err(format!(
                "top chart size must be between {min}x{min} and {max}x{max}, got {}x{}",
                self.chart.top_width,
                self.chart.top_height,
                min = MIN_CHART_SIDE,
                max = MAX_CHART_SIDE
            ));
        }

        if parse_hex_color(&self.export.highlight_color).is_none() {
            return Err(format!(
                "highlight_color must be a 6-digit RGB hex value, got '{}'",
                self.export.highlight_color
            ));
        }

        if parse_cell_ref(&self.export.image_anchor).is_none() {
            return Err(format!(
                "image_anchor must be a cell reference like F3, got '{}'",
                self.export.image_anchor
            ));
        }

        // Excel limits sheet names to 31 characters
        let name = &self.export.sheet_name;
        if name.is_empty() || name.chars().count() > 31 {
            return Err(format!(
                "sheet_name must be 1-31 characters, got '{}'",
                name
            ));
        }

        let inches = self.export.document_image_width_inches;
        if !(inches > 0.0 && inches.is_finite()) {
            return Err(format!(
                "document_image_width_inches must be positive and finite, got {}",
                self.export.document_image_width_inches
            ));
        }

        Ok(())
    }
}

/// Parse `RRGGBB` (optionally prefixed with `#`) into an RGB integer
pub fn parse_hex_color(text: &str) -> Option<u32> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Parse an A1-style cell reference into zero-based `(row, col)`
pub fn parse_cell_ref(text: &str) -> Option<(u32, u16)> {
    let split = text.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = text.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > 16_384 {
            return None;
        }
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, (col - 1) as u16))
}
