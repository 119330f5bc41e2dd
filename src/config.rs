//! Run configuration.
//!
//! There is no config file; the CLI fills an [`ExtractorConfig`] from its arguments.

use std::path::PathBuf;

use crate::backends::CamelotFlavor;

/// Default root for all output, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "extracted";

/// Resolution used to rasterize PDF image regions.
pub const DEFAULT_IMAGE_DPI: u32 = 300;

/// Page selector passed to table detection.
pub const DEFAULT_TABLE_PAGES: &str = "all";

/// Which pipeline runs for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineVariant {
    /// Text, metadata, images and tables.
    #[default]
    Full,
    /// Text and metadata only.
    TextOnly,
}

impl PipelineVariant {
    /// Suffix appended to the input base name for the JSON report.
    pub fn report_suffix(&self) -> &'static str {
        match self {
            PipelineVariant::Full => "",
            PipelineVariant::TextOnly => "_tika",
        }
    }
}

/// Settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub output_dir: PathBuf,
    pub image_dpi: u32,
    pub table_pages: String,
    pub table_flavor: CamelotFlavor,
    pub variant: PipelineVariant,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image_dpi: DEFAULT_IMAGE_DPI,
            table_pages: DEFAULT_TABLE_PAGES.to_string(),
            table_flavor: CamelotFlavor::default(),
            variant: PipelineVariant::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output root.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the rasterization resolution for PDF images.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.image_dpi = dpi;
        self
    }

    /// Set the camelot flavor used for table detection.
    pub fn with_table_flavor(mut self, flavor: CamelotFlavor) -> Self {
        self.table_flavor = flavor;
        self
    }

    pub fn with_variant(mut self, variant: PipelineVariant) -> Self {
        self.variant = variant;
        self
    }

    /// `<output>/<base>_images`
    pub fn image_dir(&self, base_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}_images", base_name))
    }

    /// `<output>/<base>_tables`
    pub fn table_dir(&self, base_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}_tables", base_name))
    }

    /// `<output>/<base>.json`, or `<base>_tika.json` for the text-only variant.
    pub fn report_path(&self, base_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.json", base_name, self.variant.report_suffix()))
    }
}
