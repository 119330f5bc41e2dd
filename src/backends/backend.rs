//! Backend abstraction for the external document-parsing collaborators.
//!
//! The pipeline never parses documents itself. Each capability it needs is a
//! trait so the orchestration can run against the real tools or against fakes:
//! - [`ContentBackend`]: raw text plus a metadata mapping
//! - [`ImageRegionBackend`]: image regions on PDF pages and their rasterization
//! - [`PackageReader`]: relationships and embedded blobs of an office package
//! - [`TableBackend`]: tables detected in a PDF

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use thiserror::Error;

/// Errors from extraction backends and the pipeline.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Package part not found: {0}")]
    MissingPart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw response of a content backend. Both fields may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub content: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Produces the text and metadata of a document.
pub trait ContentBackend {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check if the backend's dependencies are installed.
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Parse a document.
    fn parse(&self, path: &Path) -> Result<ParsedDocument, ExtractionError>;
}

/// Bounding box of an image on a PDF page, in PDF points from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRegion {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl ImageRegion {
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Image regions detected on one page, in detection order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRegions {
    /// 1-based page number.
    pub page: u32,
    pub regions: Vec<ImageRegion>,
}

/// Detects image regions in a PDF and rasterizes them.
pub trait ImageRegionBackend {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    fn availability_hint(&self) -> String;

    /// Every page of the document in page order, including pages without images.
    fn detect_regions(&self, pdf_path: &Path) -> Result<Vec<PageRegions>, ExtractionError>;

    /// Crop `page` to `region`, render it at `dpi` and save it as PNG at `dest`.
    fn rasterize(
        &self,
        pdf_path: &Path,
        page: u32,
        region: &ImageRegion,
        dpi: u32,
        dest: &Path,
    ) -> Result<(), ExtractionError>;
}

/// A relationship of the main document part of an office package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// The `Target` attribute as written in the package, e.g. `media/image1.png`.
    pub target_ref: String,
    /// External targets (hyperlinks, linked images) have no part in the package.
    pub external: bool,
}

impl Relationship {
    /// Whether the relationship points at an image, by the same loose test on the target.
    pub fn is_image(&self) -> bool {
        self.target_ref.contains("image")
    }

    /// Last path component of the target reference.
    pub fn target_basename(&self) -> &str {
        self.target_ref
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.target_ref)
    }
}

/// Reads relationships and parts from an office document package.
pub trait PackageReader {
    fn name(&self) -> &'static str;

    /// Relationships of the main document part, in package order.
    fn relationships(&self, path: &Path) -> Result<Vec<Relationship>, ExtractionError>;

    /// Binary content of the part a relationship points at.
    fn read_blob(&self, path: &Path, relationship: &Relationship)
        -> Result<Vec<u8>, ExtractionError>;
}

/// A table detected in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Page the table was found on, if the backend reports it.
    pub page: Option<u32>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Write the table as comma-separated values.
    pub fn write_csv(&self, dest: &Path) -> Result<(), ExtractionError> {
        let file = File::create(dest)?;
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Detects tables in a PDF.
pub trait TableBackend {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    fn availability_hint(&self) -> String;

    /// Detect tables on the selected pages (`"all"` or a page list like `"1,3-4"`).
    fn detect_tables(&self, pdf_path: &Path, pages: &str) -> Result<Vec<Table>, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(target: &str) -> Relationship {
        Relationship {
            id: "rId1".to_string(),
            rel_type: String::new(),
            target_ref: target.to_string(),
            external: false,
        }
    }

    #[test]
    fn test_relationship_image_match_is_substring() {
        assert!(rel("media/image1.png").is_image());
        assert!(rel("../images/logo.emf").is_image());
        assert!(!rel("styles.xml").is_image());
    }

    #[test]
    fn test_relationship_basename() {
        assert_eq!(rel("media/image1.png").target_basename(), "image1.png");
        assert_eq!(rel("image2.jpeg").target_basename(), "image2.jpeg");
    }

    #[test]
    fn test_region_dimensions() {
        let region = ImageRegion {
            x0: 10.0,
            top: 20.0,
            x1: 110.0,
            bottom: 70.0,
        };
        assert_eq!(region.width(), 100.0);
        assert_eq!(region.height(), 50.0);
    }

    #[test]
    fn test_table_write_csv_quotes_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("table_1.csv");
        let table = Table {
            page: Some(1),
            rows: vec![
                vec!["name".to_string(), "note".to_string()],
                vec!["a".to_string(), "x, y".to_string()],
                vec!["b".to_string()],
            ],
        };
        table.write_csv(&dest).unwrap();
        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, "name,note\na,\"x, y\"\nb\n");
    }
}
