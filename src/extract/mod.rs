//! Extraction stages of the pipeline.
//!
//! - [`extract_content`]: text and metadata from the content backend
//! - [`ImageExtractor`]: PDF image regions or DOCX embedded images, written to files
//! - [`TableExtractor`]: PDF tables written as CSV, behind a failure boundary

mod content;
mod images;
mod tables;

pub use content::extract_content;
pub use images::ImageExtractor;
pub use tables::TableExtractor;
