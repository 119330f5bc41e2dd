//! Document format detection by file extension.

use std::path::Path;

/// Document formats the pipeline treats differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// Text-like files that can be read directly.
    PlainText,
    Other,
}

impl DocumentFormat {
    /// Detect the format from the lowercase file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "txt" | "text" | "md" | "csv" | "tsv" | "html" | "htm" | "xml" | "json" => {
                DocumentFormat::PlainText
            }
            _ => DocumentFormat::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "text",
            DocumentFormat::Other => "other",
        }
    }

    /// Whether table detection runs for this format.
    pub fn supports_tables(&self) -> bool {
        matches!(self, DocumentFormat::Pdf)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base name of the input with its extension stripped (`dir/report.pdf` -> `report`).
pub fn input_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// MIME type guessed from the file name, defaulting to `application/octet-stream`.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_case_insensitive() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/report.PDF")), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path(Path::new("memo.docx")), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_path(Path::new("notes.md")), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_path(Path::new("sheet.xlsx")), DocumentFormat::Other);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), DocumentFormat::Other);
    }

    #[test]
    fn test_capabilities() {
        assert!(DocumentFormat::Pdf.supports_tables());
        assert!(!DocumentFormat::Docx.supports_tables());
        assert!(!DocumentFormat::Other.supports_tables());
    }

    #[test]
    fn test_input_base_name_strips_last_extension() {
        assert_eq!(input_base_name(Path::new("/tmp/report.pdf")), "report");
        assert_eq!(input_base_name(Path::new("archive.tar.gz")), "archive.tar");
        assert_eq!(input_base_name(Path::new("plain")), "plain");
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("x.pdf")), "application/pdf");
        assert_eq!(
            guess_mime_type(Path::new("x.unknownext")),
            "application/octet-stream"
        );
    }
}
