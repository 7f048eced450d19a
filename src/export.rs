//! Writing reports and charts to disk
//!
//! Output is staged in a temporary file next to the destination and renamed
//! into place once complete. If anything fails first, the temporary file is
//! removed when it goes out of scope and the destination is left untouched.

use crate::error::{ParetoError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `bytes` to `path` through a scoped temporary file
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged
        .persist(path)
        .map_err(|e| ParetoError::Export(format!("{}: {}", path.display(), e.error)))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Default spreadsheet file name for an analysis title
pub fn default_xlsx_path(title: &str) -> PathBuf {
    PathBuf::from(format!("{}_Pareto_Complete.xlsx", file_stem(title)))
}

/// Default document file name for an analysis title
pub fn default_docx_path(title: &str) -> PathBuf {
    PathBuf::from(format!("{}_Pareto_Report.docx", file_stem(title)))
}

/// Title reduced to characters safe in a file name
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim().replace(' ', "_");
    if stem.is_empty() {
        "Pareto".to_string()
    } else {
        stem
    }
}
