//! External collaborators of the extraction pipeline.
//!
//! Default implementations:
//! - [`LocalContentBackend`]: text and metadata (poppler for PDF, package parts for DOCX)
//! - [`PopplerBackend`]: image regions on PDF pages and their rasterization
//! - [`OfficePackage`]: relationships and embedded parts of DOCX packages
//! - [`CamelotBackend`]: PDF table detection
//!
//! Every capability is a trait so the pipeline can be driven by fakes in tests.

mod backend;
mod camelot;
mod local;
mod office;
mod poppler;
pub mod tools;

pub use backend::{
    ContentBackend, ExtractionError, ImageRegion, ImageRegionBackend, PackageReader,
    PageRegions, ParsedDocument, Relationship, Table, TableBackend,
};
pub use camelot::{CamelotBackend, CamelotFlavor};
pub use local::LocalContentBackend;
pub use office::OfficePackage;
pub use poppler::PopplerBackend;
