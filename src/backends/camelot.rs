//! Camelot command-line table backend.
//!
//! Runs `camelot --pages <pages> --format csv --output <tmp>/table.csv <flavor> <pdf>`.
//! Camelot writes one file per table named `table-page-{page}-table-{n}.csv`,
//! which are read back in (page, n) order.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::TempDir;

use super::tools::{check_binary, run_capture};
use super::{ExtractionError, Table, TableBackend};

static EXPORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-page-(\d+)-table-(\d+)\.csv$").unwrap());

/// Camelot parsing flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CamelotFlavor {
    /// Tables with ruling lines between cells.
    #[default]
    Lattice,
    /// Whitespace-separated tables.
    Stream,
}

impl CamelotFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CamelotFlavor::Lattice => "lattice",
            CamelotFlavor::Stream => "stream",
        }
    }
}

/// Table detection via the camelot CLI.
#[derive(Debug, Default, Clone)]
pub struct CamelotBackend {
    flavor: CamelotFlavor,
}

impl CamelotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parsing flavor.
    pub fn with_flavor(mut self, flavor: CamelotFlavor) -> Self {
        self.flavor = flavor;
        self
    }
}

impl TableBackend for CamelotBackend {
    fn name(&self) -> &'static str {
        "camelot"
    }

    fn is_available(&self) -> bool {
        check_binary("camelot")
    }

    fn availability_hint(&self) -> String {
        if check_binary("camelot") {
            "Camelot is available".to_string()
        } else {
            "camelot not installed. Install with: pip install 'camelot-py[base]'".to_string()
        }
    }

    fn detect_tables(&self, pdf_path: &Path, pages: &str) -> Result<Vec<Table>, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let output_path = temp_dir.path().join("table.csv");

        let mut cmd = Command::new("camelot");
        cmd.args(["--pages", pages, "--format", "csv", "--output"])
            .arg(&output_path)
            .arg(self.flavor.as_str())
            .arg(pdf_path);
        run_capture(&mut cmd, "camelot-py")?;

        let mut exported: Vec<(u32, u32, PathBuf)> = std::fs::read_dir(temp_dir.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter_map(|path| {
                let (page, order) = export_position(&path)?;
                Some((page, order, path))
            })
            .collect();
        exported.sort();

        exported
            .into_iter()
            .map(|(page, _, path)| {
                Ok(Table {
                    page: Some(page),
                    rows: read_rows(&path)?,
                })
            })
            .collect()
    }
}

/// `(page, n)` from a camelot export file name.
fn export_position(path: &Path) -> Option<(u32, u32)> {
    let name = path.file_name()?.to_str()?;
    let caps = EXPORT_NAME.captures(name)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    reader
        .records()
        .map(|record| Ok(record?.iter().map(str::to_string).collect()))
        .collect()
}
