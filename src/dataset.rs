//! In-memory table of causes and their occurrence counts
//!
//! Records are created by `add` or `import_batch` and destroyed by `remove`.
//! Names are unique under case-insensitive comparison; every mutation either
//! succeeds completely or leaves the dataset untouched.

use crate::error::{ParetoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single cause and how often it occurred
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseRecord {
    pub name: String,
    pub occurrence: f64,
}

/// An unvalidated row coming from a file import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub cause: String,
    pub occurrence: String,
}

impl RawRecord {
    pub fn new(cause: impl Into<String>, occurrence: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
            occurrence: occurrence.into(),
        }
    }
}

/// What an import batch did to the dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Records appended
    pub added: usize,
    /// Records dropped because the name already existed
    pub skipped: usize,
}

/// Ordered collection of causes, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CauseRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, occurrence)` pairs, validating each one
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self> {
        let mut dataset = Self::new();
        for (name, occurrence) in pairs {
            dataset.add(name.as_ref(), *occurrence)?;
        }
        Ok(dataset)
    }

    pub fn records(&self) -> &[CauseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive name lookup
    pub fn contains(&self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        self.records.iter().any(|r| r.name.to_lowercase() == key)
    }

    /// Append a new cause
    ///
    /// Fails if the trimmed name is empty, already present (ignoring case),
    /// or if the occurrence is negative or not finite.
    pub fn add(&mut self, name: &str, occurrence: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParetoError::validation("cause name is empty"));
        }
        let occurrence = validate_occurrence(name, occurrence)?;
        if self.contains(name) {
            return Err(ParetoError::validation(format!(
                "cause '{}' already exists",
                name
            )));
        }

        tracing::debug!(cause = name, occurrence, "adding cause");
        self.records.push(CauseRecord {
            name: name.to_string(),
            occurrence,
        });
        Ok(())
    }

    /// Remove every record whose name matches `name` exactly
    ///
    /// Returns how many records were removed; absence is not an error.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.name != name);
        let removed = before - self.records.len();
        tracing::debug!(cause = name, removed, "removed cause");
        removed
    }

    /// Append a batch of imported rows
    ///
    /// All rows are coerced and validated before anything is appended: one
    /// bad occurrence or blank cause rejects the whole batch. Rows whose name
    /// already exists (ignoring case) are dropped, including repeats within
    /// the batch itself.
    pub fn import_batch(&mut self, rows: &[RawRecord]) -> Result<ImportOutcome> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let name = row.cause.trim();
            if name.is_empty() {
                return Err(ParetoError::validation(format!(
                    "row {}: cause name is empty",
                    index + 1
                )));
            }
            let occurrence = coerce_occurrence(&row.occurrence).map_err(|msg| {
                ParetoError::validation(format!("row {} ('{}'): {}", index + 1, name, msg))
            })?;
            let occurrence = validate_occurrence(name, occurrence)?;
            parsed.push(CauseRecord {
                name: name.to_string(),
                occurrence,
            });
        }

        let mut seen: HashSet<String> = self
            .records
            .iter()
            .map(|r| r.name.to_lowercase())
            .collect();
        let mut outcome = ImportOutcome::default();
        for record in parsed {
            if seen.insert(record.name.to_lowercase()) {
                self.records.push(record);
                outcome.added += 1;
            } else {
                outcome.skipped += 1;
            }
        }

        tracing::info!(
            added = outcome.added,
            skipped = outcome.skipped,
            "imported batch"
        );
        Ok(outcome)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Parse an occurrence cell into a number
fn coerce_occurrence(text: &str) -> std::result::Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("occurrence is empty".to_string());
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("occurrence '{}' is not a number", trimmed))
}

/// Checked occurrence with `-0.0` folded into `0.0`
fn validate_occurrence(name: &str, occurrence: f64) -> Result<f64> {
    if !occurrence.is_finite() {
        return Err(ParetoError::validation(format!(
            "occurrence for '{}' must be a finite number",
            name
        )));
    }
    if occurrence < 0.0 {
        return Err(ParetoError::validation(format!(
            "occurrence for '{}' must be >= 0, got {}",
            name, occurrence
        )));
    }
    Ok(occurrence + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_pairs(&[("Late delivery", 12.0), ("Wrong part", 5.0)]).unwrap()
    }

    #[test]
    fn test_add_appends_trimmed_name() {
        let mut ds = Dataset::new();
        ds.add("  Scratches  ", 3.0).unwrap();
        assert_eq!(ds.records()[0].name, "Scratches");
        assert_eq!(ds.records()[0].occurrence, 3.0);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut ds = Dataset::new();
        let err = ds.add("   ", 1.0).unwrap_err();
        assert!(err.is_validation());
        assert!(ds.is_empty());
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicate() {
        let mut ds = sample();
        let err = ds.add("late DELIVERY", 4.0).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_add_rejects_negative_and_nan() {
        let mut ds = Dataset::new();
        assert!(ds.add("A", -1.0).is_err());
        assert!(ds.add("B", f64::NAN).is_err());
        assert!(ds.add("C", f64::INFINITY).is_err());
        assert!(ds.is_empty());
    }

    #[test]
    fn test_add_accepts_zero() {
        let mut ds = Dataset::new();
        ds.add("Idle", 0.0).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_negative_zero_stored_as_zero() {
        let mut ds = Dataset::new();
        ds.add("Idle", -0.0).unwrap();
        ds.import_batch(&[RawRecord::new("Standby", "-0")]).unwrap();
        assert!(ds.records().iter().all(|r| r.occurrence.is_sign_positive()));
    }

    #[test]
    fn test_remove_is_exact_match() {
        let mut ds = sample();
        assert_eq!(ds.remove("late delivery"), 0);
        assert_eq!(ds.remove("Late delivery"), 1);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut ds = sample();
        assert_eq!(ds.remove("Nothing"), 0);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_import_skips_existing_duplicate() {
        let mut ds = sample();
        let outcome = ds
            .import_batch(&[
                RawRecord::new("Paint defect", "7"),
                RawRecord::new("WRONG PART", "9"),
            ])
            .unwrap();
        assert_eq!(outcome, ImportOutcome { added: 1, skipped: 1 });
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[2].name, "Paint defect");
    }

    #[test]
    fn test_import_dedups_within_batch() {
        let mut ds = Dataset::new();
        let outcome = ds
            .import_batch(&[RawRecord::new("Leak", "4"), RawRecord::new("leak", "8")])
            .unwrap();
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(ds.records()[0].occurrence, 4.0);
    }

    #[test]
    fn test_import_non_numeric_aborts_batch() {
        let mut ds = sample();
        let err = ds
            .import_batch(&[
                RawRecord::new("Paint defect", "7"),
                RawRecord::new("Noise", "often"),
            ])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("not a number"));
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_import_negative_aborts_batch() {
        let mut ds = Dataset::new();
        assert!(ds.import_batch(&[RawRecord::new("A", "-3")]).is_err());
        assert!(ds.is_empty());
    }

    #[test]
    fn test_import_accepts_decimal_with_whitespace() {
        let mut ds = Dataset::new();
        ds.import_batch(&[RawRecord::new(" Vibration ", " 2.5 ")])
            .unwrap();
        assert_eq!(ds.records()[0].name, "Vibration");
        assert_eq!(ds.records()[0].occurrence, 2.5);
    }

    #[test]
    fn test_contains_ignores_case() {
        let ds = sample();
        assert!(ds.contains("wrong part"));
        assert!(!ds.contains("wrong parts"));
    }
}
