//! Records produced by an extraction run.

mod extraction;
mod metrics;
mod report;
mod summary;

pub use extraction::{ExtractionResult, OutputFormat};
pub use metrics::Metrics;
pub use report::Report;
pub use summary::Summary;
