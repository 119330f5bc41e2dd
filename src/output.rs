//! Console echo and JSON report file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backends::ExtractionError;
use crate::config::ExtractorConfig;
use crate::format::input_base_name;
use crate::models::Report;

/// Writes run reports under the configured output directory.
pub struct OutputWriter<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> OutputWriter<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    /// Echo the metrics and extracted data to `console`, then write the full report.
    ///
    /// The file is written in place with no temporary file. Non-ASCII text is
    /// kept literal.
    pub fn write<W: Write>(
        &self,
        console: &mut W,
        report: &Report,
        file_path: &Path,
    ) -> Result<PathBuf, ExtractionError> {
        writeln!(console, "Extraction Summary:")?;
        writeln!(console, "{}", serde_json::to_string_pretty(&report.metrics)?)?;
        writeln!(console, "\nExtracted Data:")?;
        writeln!(console, "{}", serde_json::to_string_pretty(&report.extracted_data)?)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let output_path = self.config.report_path(&input_base_name(file_path));
        std::fs::write(&output_path, serde_json::to_string_pretty(report)?)?;

        tracing::info!("Wrote report to {}", output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineVariant;
    use crate::models::{ExtractionResult, Metrics, Summary};
    use tempfile::TempDir;

    fn report(text: &str) -> Report {
        let extracted_data = ExtractionResult {
            text: text.to_string(),
            ..Default::default()
        };
        let summary = Summary::from_result(&extracted_data);
        let metrics = Metrics::build(
            &summary,
            &extracted_data,
            Path::new("docs/résumé.pdf"),
            PipelineVariant::Full,
        );
        Report {
            metrics,
            summary,
            extracted_data,
        }
    }

    #[test]
    fn test_write_creates_dir_and_named_file() {
        let dir = TempDir::new().unwrap();
        let config = ExtractorConfig::new().with_output_dir(dir.path().join("extracted"));
        let mut console = Vec::new();

        let path = OutputWriter::new(&config)
            .write(&mut console, &report("Grüße, 世界"), Path::new("docs/résumé.pdf"))
            .unwrap();

        assert_eq!(path, dir.path().join("extracted").join("résumé.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Grüße, 世界"));
        assert!(!written.contains("\\u"));

        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for key in ["metrics", "summary", "extracted_data"] {
            assert!(parsed.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_console_echo_order() {
        let dir = TempDir::new().unwrap();
        let config = ExtractorConfig::new().with_output_dir(dir.path());
        let mut console = Vec::new();

        OutputWriter::new(&config)
            .write(&mut console, &report("Hello"), Path::new("a.pdf"))
            .unwrap();

        let echoed = String::from_utf8(console).unwrap();
        let summary_at = echoed.find("Extraction Summary:").unwrap();
        let data_at = echoed.find("Extracted Data:").unwrap();
        assert!(summary_at < data_at);
        assert!(echoed.contains("\"percent_relevant_info\": 100"));
        assert!(echoed.contains("\"text\": \"Hello\""));
    }

    #[test]
    fn test_report_round_trips() {
        let dir = TempDir::new().unwrap();
        let config = ExtractorConfig::new()
            .with_output_dir(dir.path())
            .with_variant(PipelineVariant::TextOnly);
        let original = report("x");

        let path = OutputWriter::new(&config)
            .write(&mut std::io::sink(), &original, Path::new("memo.docx"))
            .unwrap();

        assert!(path.ends_with("memo_tika.json"));
        let parsed: Report = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed, original);
    }
}
