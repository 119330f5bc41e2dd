//! The JSON document written for each run.

use serde::{Deserialize, Serialize};

use super::{ExtractionResult, Metrics, Summary};

/// `{"metrics": ..., "summary": ..., "extracted_data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metrics: Metrics,
    pub summary: Summary,
    pub extracted_data: ExtractionResult,
}
