//! Report-oriented record of what was extracted, when and how.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ExtractionResult, OutputFormat, Summary};
use crate::config::PipelineVariant;

/// ISO-8601 local timestamp with microseconds and no offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const PERMISSION_NEEDED: &str = "No (open source, local processing)";

const FULL_METHOD: &str = "open source (poppler pdftotext/pdfinfo + OOXML package reader for text/metadata, \
poppler pdftohtml/pdftoppm + OOXML relationships for images, Camelot for tables)";
const FULL_NOTES: &str = "Text/metadata via poppler and OOXML package parts; images via pdftohtml/pdftoppm or \
package relationships; tables via Camelot.";

const TEXT_ONLY_METHOD: &str = "open source (poppler pdftotext/pdfinfo + OOXML package reader)";
const TEXT_ONLY_NOTES: &str = "Text/metadata only; images and tables are not extracted.";

/// Flat summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub file: PathBuf,
    pub extraction_time: String,
    pub extracted_text: bool,
    pub extracted_images: bool,
    pub extracted_tables: bool,
    pub percent_info_extracted: u32,
    /// Mirrors `percent_info_extracted`; relevance is not scored separately.
    pub percent_relevant_info: u32,
    pub output_format: OutputFormat,
    pub method_used: String,
    pub permission_needed: String,
    pub notes: String,
}

impl Metrics {
    /// Build metrics stamped with the current local time.
    pub fn build(
        summary: &Summary,
        result: &ExtractionResult,
        file_path: &Path,
        variant: PipelineVariant,
    ) -> Self {
        Self::build_at(summary, result, file_path, variant, Local::now().naive_local())
    }

    pub fn build_at(
        summary: &Summary,
        result: &ExtractionResult,
        file_path: &Path,
        variant: PipelineVariant,
        extracted_at: NaiveDateTime,
    ) -> Self {
        let (method_used, notes) = match variant {
            PipelineVariant::Full => (FULL_METHOD, FULL_NOTES),
            PipelineVariant::TextOnly => (TEXT_ONLY_METHOD, TEXT_ONLY_NOTES),
        };

        Self {
            file: file_path.to_path_buf(),
            extraction_time: extracted_at.format(TIMESTAMP_FORMAT).to_string(),
            extracted_text: !result.text.is_empty(),
            extracted_images: !result.images.is_empty(),
            extracted_tables: !result.tables.is_empty(),
            percent_info_extracted: summary.percent_info_extracted,
            percent_relevant_info: summary.percent_info_extracted,
            output_format: summary.output_format.clone(),
            method_used: method_used.to_string(),
            permission_needed: PERMISSION_NEEDED.to_string(),
            notes: notes.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_micro_opt(14, 7, 9, 42)
            .unwrap()
    }

    #[test]
    fn test_metrics_flags_follow_lists() {
        let result = ExtractionResult {
            text: "Hello".to_string(),
            images: vec!["a.png".into(), "b.png".into()],
            ..Default::default()
        };
        let summary = Summary::from_result(&result);
        let metrics = Metrics::build_at(
            &summary,
            &result,
            Path::new("report.pdf"),
            PipelineVariant::Full,
            at(),
        );

        assert_eq!(metrics.file, PathBuf::from("report.pdf"));
        assert_eq!(metrics.extraction_time, "2024-03-05T14:07:09.000042");
        assert!(metrics.extracted_text);
        assert!(metrics.extracted_images);
        assert!(!metrics.extracted_tables);
        assert_eq!(metrics.percent_info_extracted, 100);
        assert_eq!(metrics.percent_relevant_info, summary.percent_info_extracted);
        assert_eq!(metrics.permission_needed, PERMISSION_NEEDED);
        assert!(metrics.method_used.contains("Camelot"));
    }

    #[test]
    fn test_relevance_mirrors_extraction_without_text() {
        let result = ExtractionResult::default();
        let summary = Summary::from_result(&result);
        let metrics = Metrics::build(
            &summary,
            &result,
            Path::new("memo.docx"),
            PipelineVariant::TextOnly,
        );
        assert_eq!(metrics.percent_info_extracted, 0);
        assert_eq!(metrics.percent_relevant_info, 0);
        assert_eq!(metrics.notes, TEXT_ONLY_NOTES);
    }
}
