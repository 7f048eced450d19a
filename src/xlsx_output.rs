//! Spreadsheet report with the full table and chart
//!
//! Layout: title in `A1`, header `Cause, Occurrence, %, % Cum` in row 2,
//! one row per cause from row 3, the full chart anchored at the configured
//! cell, and the cause/occurrence cells of the top causes filled.

use crate::analysis::ParetoAnalysis;
use crate::chart::RenderedChart;
use crate::config::{parse_cell_ref, parse_hex_color, ExportConfig};
use crate::error::{ParetoError, Result};
use rust_xlsxwriter::{Color, Format, FormatPattern, Image, Workbook, XlsxError};

pub const HEADERS: [&str; 4] = ["Cause", "Occurrence", "%", "% Cum"];

/// First zero-based row holding data
const FIRST_DATA_ROW: u32 = 2;

/// Build the `.xlsx` workbook in memory
pub fn build_workbook(
    analysis: &ParetoAnalysis,
    title: &str,
    chart: &RenderedChart,
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let fill = parse_hex_color(&config.highlight_color).ok_or_else(|| {
        ParetoError::Config(format!(
            "invalid highlight_color '{}'",
            config.highlight_color
        ))
    })?;
    let (anchor_row, anchor_col) = parse_cell_ref(&config.image_anchor).ok_or_else(|| {
        ParetoError::Config(format!("invalid image_anchor '{}'", config.image_anchor))
    })?;

    let bytes = write_workbook(analysis, title, chart, config, fill, (anchor_row, anchor_col))
        .map_err(|e| ParetoError::Export(format!("spreadsheet: {}", e)))?;

    tracing::info!(
        rows = analysis.rows().len(),
        highlighted = analysis.top_count(),
        bytes = bytes.len(),
        "built spreadsheet report"
    );
    Ok(bytes)
}

fn write_workbook(
    analysis: &ParetoAnalysis,
    title: &str,
    chart: &RenderedChart,
    config: &ExportConfig,
    fill: u32,
    anchor: (u32, u16),
) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14);
    let header_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format("0.00%");
    let highlight_format = Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(fill));

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&config.sheet_name)?;
        sheet.write_string_with_format(0, 0, title, &title_format)?;

        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(1, col as u16, *header, &header_format)?;
        }

        for (index, row) in analysis.rows().iter().enumerate() {
            let r = FIRST_DATA_ROW + index as u32;
            if analysis.is_top(index) {
                sheet.write_string_with_format(r, 0, &row.name, &highlight_format)?;
                sheet.write_number_with_format(r, 1, row.occurrence, &highlight_format)?;
            } else {
                sheet.write_string(r, 0, &row.name)?;
                sheet.write_number(r, 1, row.occurrence)?;
            }
            sheet.write_number_with_format(r, 2, row.share, &percent_format)?;
            sheet.write_number_with_format(r, 3, row.cumulative_share, &percent_format)?;
        }

        sheet.set_column_width(0, 30)?;
        sheet.set_column_width(1, 12)?;

        let image = Image::new_from_buffer(&chart.png)?;
        sheet.insert_image(anchor.0, anchor.1, &image)?;
    }

    workbook.save_to_buffer()
}
