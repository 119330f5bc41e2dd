//! Local content backend: text and metadata without a parsing server.
//!
//! Dispatches on the document format:
//! - PDF: poppler `pdftotext` and `pdfinfo`
//! - DOCX: the main document part and property parts of the package
//! - text-like files: read directly
//! - anything else: metadata only

use std::collections::BTreeMap;
use std::path::Path;

use super::office::OfficePackage;
use super::poppler::PopplerBackend;
use super::tools::check_binary;
use super::{ContentBackend, ExtractionError, ParsedDocument};
use crate::format::{guess_mime_type, DocumentFormat};

/// Content backend built from local tools and readers.
#[derive(Debug, Default, Clone)]
pub struct LocalContentBackend {
    poppler: PopplerBackend,
    office: OfficePackage,
}

impl LocalContentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata every parse reports, whatever the format.
    fn base_metadata(path: &Path) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        metadata.insert("Content-Type".to_string(), guess_mime_type(path));
        if let Some(name) = path.file_name() {
            metadata.insert("resourceName".to_string(), name.to_string_lossy().into_owned());
        }
        metadata
    }
}

impl ContentBackend for LocalContentBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn is_available(&self) -> bool {
        check_binary("pdftotext") && check_binary("pdfinfo")
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "pdftotext and pdfinfo are available".to_string()
        } else {
            "pdftotext/pdfinfo not installed (PDF text disabled). Install with: apt install poppler-utils"
                .to_string()
        }
    }

    fn parse(&self, path: &Path) -> Result<ParsedDocument, ExtractionError> {
        let format = DocumentFormat::from_path(path);
        let mut metadata = Self::base_metadata(path);
        tracing::debug!("Parsing {} as {}", path.display(), format);

        let content = match format {
            DocumentFormat::Pdf => {
                metadata.extend(self.poppler.extract_metadata(path)?);
                Some(self.poppler.extract_text(path)?)
            }
            DocumentFormat::Docx => {
                metadata.extend(self.office.properties(path)?);
                Some(self.office.document_text(path)?)
            }
            DocumentFormat::PlainText => {
                let bytes = std::fs::read(path)?;
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            DocumentFormat::Other => {
                // A missing input is still an error.
                std::fs::metadata(path)?;
                None
            }
        };

        Ok(ParsedDocument {
            content,
            metadata: Some(metadata),
        })
    }
}
