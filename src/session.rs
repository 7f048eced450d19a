//! Analysis session: the dataset plus the settings that shape its reports
//!
//! Both the one-shot CLI and the interactive shell drive a `Session`. Each
//! operation runs to completion; failures leave the dataset as it was.

use crate::analysis::ParetoAnalysis;
use crate::chart::{self, RenderedChart};
use crate::config::ParetoConfig;
use crate::dataset::{Dataset, ImportOutcome};
use crate::docx_output;
use crate::error::{ParetoError, Result};
use crate::export;
use crate::import;
use crate::xlsx_output;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Dataset,
    config: ParetoConfig,
}

impl Session {
    pub fn new(config: ParetoConfig) -> Self {
        Self {
            dataset: Dataset::new(),
            config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ParetoConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ParetoError::validation("title is empty"));
        }
        self.config.title = title.to_string();
        Ok(())
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ParetoError::validation(format!(
                "threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        self.config.threshold = threshold;
        Ok(())
    }

    pub fn add(&mut self, name: &str, occurrence: f64) -> Result<()> {
        self.dataset.add(name, occurrence)
    }

    pub fn remove(&mut self, name: &str) -> usize {
        self.dataset.remove(name)
    }

    pub fn clear(&mut self) {
        self.dataset.clear();
    }

    /// Import a CSV or spreadsheet file into the dataset
    pub fn import_file(&mut self, path: &Path) -> Result<ImportOutcome> {
        let rows = import::read_file(path)?;
        self.dataset.import_batch(&rows)
    }

    /// Analyze the current dataset; fails on an empty one
    pub fn analysis(&self) -> Result<ParetoAnalysis> {
        ParetoAnalysis::compute(self.dataset.records(), self.config.threshold)
    }

    pub fn render_chart(&self, analysis: &ParetoAnalysis) -> Result<RenderedChart> {
        chart::render_pareto_chart(analysis, self.title(), &self.config.chart)
    }

    pub fn render_top_chart(&self, analysis: &ParetoAnalysis) -> Result<RenderedChart> {
        chart::render_top_chart(analysis, self.title(), &self.config.chart)
    }

    /// Spreadsheet report bytes
    pub fn spreadsheet(&self) -> Result<Vec<u8>> {
        let analysis = self.analysis()?;
        let chart = self.render_chart(&analysis)?;
        xlsx_output::build_workbook(&analysis, self.title(), &chart, &self.config.export)
    }

    /// Document report bytes
    pub fn document(&self) -> Result<Vec<u8>> {
        let analysis = self.analysis()?;
        let chart = self.render_top_chart(&analysis)?;
        docx_output::build_document(&analysis, self.title(), &chart, &self.config.export)
    }

    /// Write the spreadsheet report; defaults to a name derived from the title
    pub fn export_spreadsheet(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| export::default_xlsx_path(self.title()));
        let bytes = self.spreadsheet()?;
        export::write_atomic(&path, &bytes)?;
        Ok(path)
    }

    /// Write the document report; defaults to a name derived from the title
    pub fn export_document(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| export::default_docx_path(self.title()));
        let bytes = self.document()?;
        export::write_atomic(&path, &bytes)?;
        Ok(path)
    }

    /// Write the full chart as PNG
    pub fn export_chart(&self, path: &Path) -> Result<()> {
        let analysis = self.analysis()?;
        let chart = self.render_chart(&analysis)?;
        export::write_atomic(path, &chart.png)
    }

    /// Write the top-causes chart as PNG
    pub fn export_top_chart(&self, path: &Path) -> Result<()> {
        let analysis = self.analysis()?;
        let chart = self.render_top_chart(&analysis)?;
        export::write_atomic(path, &chart.png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use tempfile::TempDir;

    fn session() -> Session {
        let mut config = ParetoConfig::default();
        config.chart = ChartConfig {
            width: 300,
            height: 200,
            top_width: 200,
            top_height: 150,
            font_path: None,
        };
        Session::new(config)
    }

    #[test]
    fn test_empty_session_refuses_exports() {
        let dir = TempDir::new().unwrap();
        let s = session();
        assert!(matches!(s.analysis(), Err(ParetoError::EmptyDataset)));
        let path = dir.path().join("r.xlsx");
        assert!(matches!(
            s.export_spreadsheet(Some(&path)),
            Err(ParetoError::EmptyDataset)
        ));
        assert!(!path.exists());
        assert!(s.export_chart(&dir.path().join("c.png")).is_err());
    }

    #[test]
    fn test_set_title_rejects_blank() {
        let mut s = session();
        assert!(s.set_title("  ").is_err());
        s.set_title(" Line 3 ").unwrap();
        assert_eq!(s.title(), "Line 3");
    }

    #[test]
    fn test_set_threshold_bounds() {
        let mut s = session();
        assert!(s.set_threshold(0.0).is_err());
        assert!(s.set_threshold(1.01).is_err());
        s.set_threshold(0.9).unwrap();
        assert_eq!(s.config().threshold, 0.9);
    }

    #[test]
    fn test_exports_write_files() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.add("Jam", 7.0).unwrap();
        s.add("Leak", 2.0).unwrap();

        let xlsx = dir.path().join("r.xlsx");
        let docx = dir.path().join("r.docx");
        let png = dir.path().join("c.png");
        let top_png = dir.path().join("t.png");
        assert_eq!(s.export_spreadsheet(Some(&xlsx)).unwrap(), xlsx);
        assert_eq!(s.export_document(Some(&docx)).unwrap(), docx);
        s.export_chart(&png).unwrap();
        s.export_top_chart(&top_png).unwrap();

        for path in [&xlsx, &docx] {
            let bytes = std::fs::read(path).unwrap();
            assert!(bytes.starts_with(b"PK"));
        }
        assert!(std::fs::read(&png).unwrap().starts_with(&[0x89, b'P', b'N', b'G']));
        assert!(top_png.exists());
    }

    #[test]
    fn test_import_file_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("causes.csv");
        std::fs::write(&path, "Cause,Occurrence\nJam,7\njam,3\nLeak,1\n").unwrap();

        let mut s = session();
        let outcome = s.import_file(&path).unwrap();
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(s.dataset().len(), 2);
    }

    #[test]
    fn test_failed_import_leaves_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("causes.csv");
        std::fs::write(&path, "Cause,Count\nJam,7\n").unwrap();

        let mut s = session();
        s.add("Existing", 1.0).unwrap();
        assert!(s.import_file(&path).unwrap_err().is_validation());
        assert_eq!(s.dataset().len(), 1);
    }
}
