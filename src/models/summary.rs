//! Heuristic digest of an extraction.

use serde::{Deserialize, Serialize};

use super::{ExtractionResult, OutputFormat};

/// What was found, in coarse terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text_extracted: bool,
    pub output_format: OutputFormat,
    pub metadata_extracted: bool,
    /// 100 when any text was found, otherwise 0. Images and tables do not count.
    pub percent_info_extracted: u32,
}

impl Summary {
    /// Summarize an extraction result.
    pub fn from_result(result: &ExtractionResult) -> Self {
        let text_extracted = !result.text.is_empty();
        Self {
            text_extracted,
            output_format: result.output_format.clone(),
            metadata_extracted: !result.metadata.is_empty(),
            percent_info_extracted: if text_extracted { 100 } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_present() {
        let result = ExtractionResult {
            text: "Hello".to_string(),
            ..Default::default()
        };
        let summary = Summary::from_result(&result);
        assert!(summary.text_extracted);
        assert!(!summary.metadata_extracted);
        assert_eq!(summary.percent_info_extracted, 100);
    }

    #[test]
    fn test_images_alone_count_for_nothing() {
        let mut result = ExtractionResult {
            images: vec!["extracted/memo_images/image1.png".into()],
            ..Default::default()
        };
        result
            .metadata
            .insert("Content-Type".to_string(), "application/pdf".to_string());
        let summary = Summary::from_result(&result);
        assert!(!summary.text_extracted);
        assert!(summary.metadata_extracted);
        assert_eq!(summary.percent_info_extracted, 0);
    }

    #[test]
    fn test_whitespace_counts_as_text() {
        let result = ExtractionResult {
            text: "\n".to_string(),
            ..Default::default()
        };
        assert_eq!(Summary::from_result(&result).percent_info_extracted, 100);
    }
}
