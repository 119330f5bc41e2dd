//! Raw extraction output for one document.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backends::ParsedDocument;

/// Shape descriptor of the text and metadata fields. Always `{"text": "str", "metadata": "dict"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormat {
    pub text: String,
    pub metadata: String,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            text: "str".to_string(),
            metadata: "dict".to_string(),
        }
    }
}

/// Everything extracted from a document.
///
/// `images` and `tables` hold the paths of files written by the pipeline, in
/// extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub metadata: BTreeMap<String, String>,
    pub output_format: OutputFormat,
    pub images: Vec<PathBuf>,
    pub tables: Vec<PathBuf>,
}

impl ExtractionResult {
    /// Build from a content backend response; missing content or metadata become empty.
    pub fn from_parsed(parsed: ParsedDocument) -> Self {
        Self {
            text: parsed.content.unwrap_or_default(),
            metadata: parsed.metadata.unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parsed_defaults_missing_fields() {
        let result = ExtractionResult::from_parsed(ParsedDocument::default());
        assert_eq!(result.text, "");
        assert!(result.metadata.is_empty());
        assert!(result.images.is_empty());
        assert!(result.tables.is_empty());
        assert_eq!(result.output_format, OutputFormat::default());
    }

    #[test]
    fn test_output_format_serializes_in_order() {
        let json = serde_json::to_string(&OutputFormat::default()).unwrap();
        assert_eq!(json, r#"{"text":"str","metadata":"dict"}"#);
    }
}
