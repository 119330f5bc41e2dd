//! Text and metadata extraction.

use std::path::Path;

use crate::backends::{ContentBackend, ExtractionError};
use crate::models::ExtractionResult;

/// Send the document to the content backend once.
///
/// Backend errors are returned as-is; there is no fallback.
pub fn extract_content(
    backend: &dyn ContentBackend,
    file_path: &Path,
) -> Result<ExtractionResult, ExtractionError> {
    tracing::debug!("Extracting text via {} backend", backend.name());
    let parsed = backend.parse(file_path)?;
    Ok(ExtractionResult::from_parsed(parsed))
}
