//! The extraction pipeline.
//!
//! One document per run, strictly in order:
//! 1. content (text + metadata)
//! 2. images (PDF regions or DOCX embedded parts)
//! 3. tables (PDF only, failures tolerated)
//! 4. summary and metrics
//! 5. console echo and JSON report
//!
//! The text-only variant stops after step 1 and creates no image or table folders.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backends::{
    CamelotBackend, ContentBackend, ExtractionError, ImageRegionBackend, LocalContentBackend,
    OfficePackage, PackageReader, PopplerBackend, TableBackend,
};
use crate::config::{ExtractorConfig, PipelineVariant};
use crate::extract::{extract_content, ImageExtractor, TableExtractor};
use crate::format::{input_base_name, DocumentFormat};
use crate::models::{ExtractionResult, Metrics, Report, Summary};
use crate::output::OutputWriter;

/// The external collaborators a pipeline runs against.
pub struct Backends {
    pub content: Box<dyn ContentBackend>,
    pub images: Box<dyn ImageRegionBackend>,
    pub package: Box<dyn PackageReader>,
    pub tables: Box<dyn TableBackend>,
}

impl Backends {
    /// Poppler, OOXML package reader and Camelot.
    pub fn local(config: &ExtractorConfig) -> Self {
        Self {
            content: Box::new(LocalContentBackend::new()),
            images: Box::new(PopplerBackend::new()),
            package: Box::new(OfficePackage::new()),
            tables: Box::new(CamelotBackend::new().with_flavor(config.table_flavor)),
        }
    }

    /// Availability of each backend with a hint for the missing ones.
    pub fn availability(&self) -> Vec<(&'static str, bool, String)> {
        vec![
            (
                self.content.name(),
                self.content.is_available(),
                self.content.availability_hint(),
            ),
            (
                self.images.name(),
                self.images.is_available(),
                self.images.availability_hint(),
            ),
            (
                self.tables.name(),
                self.tables.is_available(),
                self.tables.availability_hint(),
            ),
        ]
    }
}

pub struct Pipeline {
    config: ExtractorConfig,
    backends: Backends,
}

impl Pipeline {
    pub fn new(config: ExtractorConfig, backends: Backends) -> Self {
        Self { config, backends }
    }

    /// Pipeline over the local tool backends.
    pub fn with_local_backends(config: ExtractorConfig) -> Self {
        let backends = Backends::local(&config);
        Self::new(config, backends)
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Run the extraction stages and summarize them.
    pub fn extract_document(
        &self,
        file_path: &Path,
    ) -> Result<(Summary, ExtractionResult), ExtractionError> {
        let mut result = extract_content(self.backends.content.as_ref(), file_path)?;

        if self.config.variant == PipelineVariant::Full {
            let format = DocumentFormat::from_path(file_path);
            let base_name = input_base_name(file_path);
            tracing::debug!("Extracting images and tables from {} ({})", file_path.display(), format);

            let images = ImageExtractor::new(
                self.backends.images.as_ref(),
                self.backends.package.as_ref(),
                self.config.image_dpi,
            );
            let tables = TableExtractor::new(self.backends.tables.as_ref(), &self.config.table_pages);

            result.images = images.extract(file_path, format, &self.config.image_dir(&base_name))?;
            result.tables = tables.extract(file_path, format, &self.config.table_dir(&base_name))?;
        }

        let summary = Summary::from_result(&result);
        Ok((summary, result))
    }

    /// Extract a document and assemble its report.
    pub fn build_report(&self, file_path: &Path) -> Result<Report, ExtractionError> {
        let (summary, extracted_data) = self.extract_document(file_path)?;
        let metrics = Metrics::build(&summary, &extracted_data, file_path, self.config.variant);
        Ok(Report {
            metrics,
            summary,
            extracted_data,
        })
    }

    /// Full run: extract, echo to `console` and write the JSON report. Returns its path.
    pub fn run<W: Write>(&self, file_path: &Path, console: &mut W) -> Result<PathBuf, ExtractionError> {
        tracing::info!("Processing {}", file_path.display());
        let report = self.build_report(file_path)?;
        OutputWriter::new(&self.config).write(console, &report, file_path)
    }
}
