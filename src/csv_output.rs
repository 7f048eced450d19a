//! CSV output format for Pareto tables
//!
//! Columns mirror the spreadsheet export so the output can be imported again.

use crate::analysis::ParetoAnalysis;
use crate::import::{CAUSE_COLUMN, OCCURRENCE_COLUMN};

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a> {
    analysis: &'a ParetoAnalysis,
    include_top_flag: bool,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter
    pub fn new(analysis: &'a ParetoAnalysis, include_top_flag: bool) -> Self {
        Self {
            analysis,
            include_top_flag,
        }
    }

    /// Generate CSV header row based on enabled flags
    fn header(&self) -> Vec<&'static str> {
        let mut headers = vec![CAUSE_COLUMN, OCCURRENCE_COLUMN, "%", "% Cum"];
        if self.include_top_flag {
            headers.push("Top");
        }
        headers
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> csv::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.header())?;

        for (index, row) in self.analysis.rows().iter().enumerate() {
            let mut fields = vec![
                row.name.clone(),
                row.occurrence.to_string(),
                format!("{:.6}", row.share),
                format!("{:.6}", row.cumulative_share),
            ];
            if self.include_top_flag {
                fields.push(self.analysis.is_top(index).to_string());
            }
            writer.write_record(&fields)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
