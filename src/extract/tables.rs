//! Table extraction to CSV files.
//!
//! This is the only stage with a failure boundary: a backend or export error is
//! logged and the run continues with the tables written so far.

use std::path::{Path, PathBuf};

use crate::backends::{ExtractionError, TableBackend};
use crate::format::DocumentFormat;

pub struct TableExtractor<'a> {
    backend: &'a dyn TableBackend,
    pages: &'a str,
}

impl<'a> TableExtractor<'a> {
    pub fn new(backend: &'a dyn TableBackend, pages: &'a str) -> Self {
        Self { backend, pages }
    }

    /// Write the tables of a PDF as `table_{n}.csv` into `table_dir`.
    ///
    /// `table_dir` is created for every format. Only a failure to create it is
    /// returned as an error.
    pub fn extract(
        &self,
        file_path: &Path,
        format: DocumentFormat,
        table_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        std::fs::create_dir_all(table_dir)?;

        if !format.supports_tables() {
            return Ok(Vec::new());
        }

        let mut tables = Vec::new();
        if let Err(e) = self.export_tables(file_path, table_dir, &mut tables) {
            tracing::warn!("Table extraction error ({}): {}", self.backend.name(), e);
        }

        tracing::info!("Extracted {} tables from {}", tables.len(), file_path.display());
        Ok(tables)
    }

    fn export_tables(
        &self,
        file_path: &Path,
        table_dir: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), ExtractionError> {
        let detected = self.backend.detect_tables(file_path, self.pages)?;

        for (idx, table) in detected.iter().enumerate() {
            let table_path = table_dir.join(format!("table_{}.csv", idx + 1));
            table.write_csv(&table_path)?;
            match table.page {
                Some(page) => tracing::debug!("Wrote {} (page {})", table_path.display(), page),
                None => tracing::debug!("Wrote {}", table_path.display()),
            }
            written.push(table_path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::Table;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FakeTables {
        result: fn() -> Result<Vec<Table>, ExtractionError>,
        calls: Cell<usize>,
    }

    impl FakeTables {
        fn new(result: fn() -> Result<Vec<Table>, ExtractionError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl TableBackend for FakeTables {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            String::new()
        }

        fn detect_tables(&self, _pdf_path: &Path, pages: &str) -> Result<Vec<Table>, ExtractionError> {
            assert_eq!(pages, "all");
            self.calls.set(self.calls.get() + 1);
            (self.result)()
        }
    }

    fn two_tables() -> Result<Vec<Table>, ExtractionError> {
        Ok(vec![
            Table {
                page: Some(1),
                rows: vec![vec!["a".to_string(), "b".to_string()]],
            },
            Table {
                page: Some(2),
                rows: vec![vec!["c".to_string()]],
            },
        ])
    }

    fn failing() -> Result<Vec<Table>, ExtractionError> {
        Err(ExtractionError::ToolNotFound("camelot".to_string()))
    }

    #[test]
    fn test_tables_written_in_detection_order() {
        let dir = TempDir::new().unwrap();
        let table_dir = dir.path().join("report_tables");
        let backend = FakeTables::new(two_tables);

        let tables = TableExtractor::new(&backend, "all")
            .extract(Path::new("report.pdf"), DocumentFormat::Pdf, &table_dir)
            .unwrap();

        assert_eq!(
            tables,
            vec![table_dir.join("table_1.csv"), table_dir.join("table_2.csv")]
        );
        assert_eq!(std::fs::read_to_string(&tables[0]).unwrap(), "a,b\n");
    }

    #[test]
    fn test_backend_failure_yields_no_tables() {
        let dir = TempDir::new().unwrap();
        let table_dir = dir.path().join("broken_tables");
        let backend = FakeTables::new(failing);

        let tables = TableExtractor::new(&backend, "all")
            .extract(Path::new("broken.pdf"), DocumentFormat::Pdf, &table_dir)
            .unwrap();

        assert!(tables.is_empty());
        assert!(table_dir.is_dir());
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn test_non_pdf_skips_backend_but_creates_dir() {
        let dir = TempDir::new().unwrap();
        let table_dir = dir.path().join("memo_tables");
        let backend = FakeTables::new(two_tables);

        let tables = TableExtractor::new(&backend, "all")
            .extract(Path::new("memo.docx"), DocumentFormat::Docx, &table_dir)
            .unwrap();

        assert!(tables.is_empty());
        assert!(table_dir.is_dir());
        assert_eq!(backend.calls.get(), 0);
    }
}
