//! Reading cause tables from CSV and spreadsheet files
//!
//! A file must contain a `Cause` column and an `Occurrence` column; other
//! columns are ignored. The header row does not have to be the first one: the
//! first row (within `HEADER_SEARCH_ROWS`) holding both names is used, so an
//! exported report with its title row can be imported again.
//!
//! Occurrence cells are returned as text; numeric validation happens in
//! [`Dataset::import_batch`](crate::dataset::Dataset::import_batch).

use crate::dataset::RawRecord;
use crate::error::{ParetoError, Result};
use calamine::{Data, Reader};
use std::io::{Read, Seek};
use std::path::Path;

pub const CAUSE_COLUMN: &str = "Cause";
pub const OCCURRENCE_COLUMN: &str = "Occurrence";

/// How many leading rows are scanned for the header
const HEADER_SEARCH_ROWS: usize = 10;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Spreadsheet,
}

impl ImportFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(ImportFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(ImportFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Read the `Cause`/`Occurrence` rows from a file
pub fn read_file(path: &Path) -> Result<Vec<RawRecord>> {
    let format = ImportFormat::from_path(path).ok_or_else(|| {
        ParetoError::validation(format!(
            "unsupported file type '{}' (expected .csv or .xlsx)",
            path.display()
        ))
    })?;

    let import_err = |message: String| ParetoError::Import {
        path: path.display().to_string(),
        message,
    };

    let table = match format {
        ImportFormat::Csv => {
            let file = std::fs::File::open(path)?;
            read_csv_table(file).map_err(import_err)?
        }
        ImportFormat::Spreadsheet => {
            let mut workbook = calamine::open_workbook_auto(path)
                .map_err(|e| import_err(e.to_string()))?;
            first_sheet_table(&mut workbook).map_err(import_err)?
        }
    };

    let records = extract_records(&table)?;
    tracing::info!(path = %path.display(), rows = records.len(), "read import file");
    Ok(records)
}

/// Read `Cause`/`Occurrence` rows from CSV text
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let table = read_csv_table(reader).map_err(|message| ParetoError::Import {
        path: "<csv>".to_string(),
        message,
    })?;
    extract_records(&table)
}

/// Read `Cause`/`Occurrence` rows from an in-memory `.xlsx` workbook
pub fn read_xlsx<RS: Read + Seek>(reader: RS) -> Result<Vec<RawRecord>> {
    let import_err = |message: String| ParetoError::Import {
        path: "<xlsx>".to_string(),
        message,
    };
    let mut workbook: calamine::Xlsx<RS> =
        calamine::open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| import_err(e.to_string()))?;
    let table = first_sheet_table(&mut workbook).map_err(import_err)?;
    extract_records(&table)
}

fn read_csv_table<R: Read>(reader: R) -> std::result::Result<Vec<Vec<String>>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        table.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

fn first_sheet_table<RS, R>(workbook: &mut R) -> std::result::Result<Vec<Vec<String>>, String>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook has no worksheets".to_string())?
        .map_err(|e| e.to_string())?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Locate the header row and pull out the two required columns
fn extract_records(table: &[Vec<String>]) -> Result<Vec<RawRecord>> {
    let header = table
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .find_map(|(index, row)| {
            let cause = column_index(row, CAUSE_COLUMN)?;
            let occurrence = column_index(row, OCCURRENCE_COLUMN)?;
            Some((index, cause, occurrence))
        });

    let (header_row, cause_col, occurrence_col) = header.ok_or_else(|| {
        ParetoError::validation(format!(
            "the file must contain the columns '{}' and '{}'",
            CAUSE_COLUMN, OCCURRENCE_COLUMN
        ))
    })?;

    let cell = |row: &[String], col: usize| row.get(col).cloned().unwrap_or_default();

    Ok(table[header_row + 1..]
        .iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|row| RawRecord::new(cell(row, cause_col), cell(row, occurrence_col)))
        .collect())
}

fn column_index(row: &[String], name: &str) -> Option<usize> {
    row.iter().position(|c| c.trim() == name)
}
