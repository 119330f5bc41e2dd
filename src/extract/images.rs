//! Image extraction to files.
//!
//! PDF: every detected image region is cropped and rasterized to
//! `pdf_page{page}_img{n}.png`. DOCX: every relationship whose target mentions
//! "image" has its part written under the target's base name. Identical names
//! overwrite each other.

use std::path::{Path, PathBuf};

use crate::backends::{ExtractionError, ImageRegionBackend, PackageReader};
use crate::format::DocumentFormat;

pub struct ImageExtractor<'a> {
    regions: &'a dyn ImageRegionBackend,
    package: &'a dyn PackageReader,
    dpi: u32,
}

impl<'a> ImageExtractor<'a> {
    pub fn new(
        regions: &'a dyn ImageRegionBackend,
        package: &'a dyn PackageReader,
        dpi: u32,
    ) -> Self {
        Self {
            regions,
            package,
            dpi,
        }
    }

    /// Write the images of a document into `image_dir` and return their paths.
    ///
    /// `image_dir` is created first, whatever the format.
    pub fn extract(
        &self,
        file_path: &Path,
        format: DocumentFormat,
        image_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        std::fs::create_dir_all(image_dir)?;

        let images = match format {
            DocumentFormat::Pdf => self.extract_pdf(file_path, image_dir)?,
            DocumentFormat::Docx => self.extract_docx(file_path, image_dir)?,
            _ => Vec::new(),
        };

        tracing::info!("Extracted {} images from {}", images.len(), file_path.display());
        Ok(images)
    }

    fn extract_pdf(&self, file_path: &Path, image_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let mut images = Vec::new();

        for page in self.regions.detect_regions(file_path)? {
            for (idx, region) in page.regions.iter().enumerate() {
                let image_path = image_dir.join(format!("pdf_page{}_img{}.png", page.page, idx + 1));
                self.regions
                    .rasterize(file_path, page.page, region, self.dpi, &image_path)?;
                images.push(image_path);
            }
        }

        Ok(images)
    }

    fn extract_docx(&self, file_path: &Path, image_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let mut images = Vec::new();

        for rel in self.package.relationships(file_path)? {
            if !rel.is_image() {
                continue;
            }
            if rel.external {
                tracing::debug!("Skipping external image target {}", rel.target_ref);
                continue;
            }

            let data = self.package.read_blob(file_path, &rel)?;
            let image_path = image_dir.join(rel.target_basename());
            std::fs::write(&image_path, data)?;
            images.push(image_path);
        }

        Ok(images)
    }
}
