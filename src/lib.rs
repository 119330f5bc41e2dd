//! docextract - document text, metadata, image and table extraction.
//!
//! Orchestrates external parsers (poppler, an OOXML package reader, Camelot)
//! over a single document and writes a JSON report with a coarse summary and
//! run metrics.

pub mod backends;
pub mod cli;
pub mod config;
pub mod extract;
pub mod format;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use backends::ExtractionError;
pub use config::{ExtractorConfig, PipelineVariant};
pub use models::{ExtractionResult, Metrics, Report, Summary};
pub use pipeline::{Backends, Pipeline};
