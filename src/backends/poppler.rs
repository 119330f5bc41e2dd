//! Poppler command-line backend.
//!
//! Uses the poppler-utils binaries:
//! - `pdftotext` for text
//! - `pdfinfo` for document metadata
//! - `pdftohtml -xml` for the positions of images on each page
//! - `pdftoppm` to crop and rasterize a region of a page

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::TempDir;

use super::tools::{check_binary, run_capture, run_for_file};
use super::{ExtractionError, ImageRegion, ImageRegionBackend, PageRegions};
use crate::utils::xml;

/// PDF user space units per inch.
const POINTS_PER_INCH: f64 = 72.0;

const POPPLER_PACKAGE: &str = "poppler-utils";

/// Backend for PDF text, metadata and image regions via poppler-utils.
#[derive(Debug, Default, Clone)]
pub struct PopplerBackend;

impl PopplerBackend {
    pub fn new() -> Self {
        Self
    }

    /// Run pdftotext on a PDF file.
    pub fn extract_text(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let mut cmd = Command::new("pdftotext");
        cmd.args(["-enc", "UTF-8"]).arg(file_path).arg("-"); // Output to stdout
        run_capture(&mut cmd, POPPLER_PACKAGE)
    }

    /// Run pdfinfo and collect its `Key: value` lines.
    pub fn extract_metadata(
        &self,
        file_path: &Path,
    ) -> Result<BTreeMap<String, String>, ExtractionError> {
        let stdout = run_capture(Command::new("pdfinfo").arg(file_path), POPPLER_PACKAGE)?;
        Ok(parse_pdfinfo(&stdout))
    }
}

impl ImageRegionBackend for PopplerBackend {
    fn name(&self) -> &'static str {
        "poppler"
    }

    fn is_available(&self) -> bool {
        check_binary("pdftohtml") && check_binary("pdftoppm")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("pdftohtml") || !check_binary("pdftoppm") {
            "pdftohtml/pdftoppm not installed. Install with: apt install poppler-utils".to_string()
        } else {
            "Poppler is available".to_string()
        }
    }

    fn detect_regions(&self, pdf_path: &Path) -> Result<Vec<PageRegions>, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let prefix = temp_dir.path().join("doc");

        let xml_path = prefix.with_extension("xml");

        let mut cmd = Command::new("pdftohtml");
        cmd.args(["-xml", "-q", "-zoom", "1"]).arg(pdf_path).arg(&prefix);
        run_for_file(&mut cmd, POPPLER_PACKAGE, &xml_path)?;

        let bytes = std::fs::read(&xml_path)?;
        let pages = parse_pdftohtml_xml(&String::from_utf8_lossy(&bytes))?;

        tracing::debug!(
            "Detected {} image regions on {} pages of {}",
            pages.iter().map(|p| p.regions.len()).sum::<usize>(),
            pages.len(),
            pdf_path.display()
        );
        Ok(pages)
    }

    fn rasterize(
        &self,
        pdf_path: &Path,
        page: u32,
        region: &ImageRegion,
        dpi: u32,
        dest: &Path,
    ) -> Result<(), ExtractionError> {
        let crop = PixelCrop::from_region(region, dpi);
        let page_str = page.to_string();
        let prefix = dest.with_extension("");

        let produced = prefix.with_extension("png");

        let mut cmd = Command::new("pdftoppm");
        cmd.args(["-png", "-singlefile"])
            .args(["-r", &dpi.to_string()])
            .args(["-f", &page_str, "-l", &page_str])
            .args(["-x", &crop.x.to_string(), "-y", &crop.y.to_string()])
            .args(["-W", &crop.width.to_string(), "-H", &crop.height.to_string()])
            .arg(pdf_path)
            .arg(&prefix);
        run_for_file(&mut cmd, POPPLER_PACKAGE, &produced)?;
        if produced != dest {
            std::fs::rename(&produced, dest)?;
        }
        Ok(())
    }
}

/// Crop box in device pixels at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelCrop {
    x: u64,
    y: u64,
    width: u64,
    height: u64,
}

impl PixelCrop {
    fn from_region(region: &ImageRegion, dpi: u32) -> Self {
        let to_pixels = |points: f64| points * f64::from(dpi) / POINTS_PER_INCH;
        Self {
            x: to_pixels(region.x0).floor().max(0.0) as u64,
            y: to_pixels(region.top).floor().max(0.0) as u64,
            width: (to_pixels(region.width()).ceil() as u64).max(1),
            height: (to_pixels(region.height()).ceil() as u64).max(1),
        }
    }
}

/// Parse `pdfinfo` output into a metadata map. Lines without a value are dropped.
fn parse_pdfinfo(stdout: &str) -> BTreeMap<String, String> {
    stdout
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}

/// Read `<page>` and `<image>` elements from `pdftohtml -xml -zoom 1` output.
///
/// Images are attributed to the most recent page element. Pages appear even when
/// they hold no images.
fn parse_pdftohtml_xml(xml_text: &str) -> Result<Vec<PageRegions>, ExtractionError> {
    let mut reader = Reader::from_str(xml_text);
    let mut buf = Vec::new();
    let mut pages: Vec<PageRegions> = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"page" => {
                let page = xml::attribute(e, "number")?
                    .and_then(|n| n.trim().parse().ok())
                    .unwrap_or(pages.len() as u32 + 1);
                pages.push(PageRegions {
                    page,
                    regions: Vec::new(),
                });
            }
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"image" => {
                let geometry = (
                    xml::numeric_attribute(e, "top")?,
                    xml::numeric_attribute(e, "left")?,
                    xml::numeric_attribute(e, "width")?,
                    xml::numeric_attribute(e, "height")?,
                );
                let (Some(top), Some(left), Some(width), Some(height)) = geometry else {
                    tracing::debug!("Skipping image element without geometry");
                    continue;
                };

                match pages.last_mut() {
                    Some(page) => page.regions.push(ImageRegion {
                        x0: left,
                        top,
                        x1: left + width,
                        bottom: top + height,
                    }),
                    None => tracing::debug!("Skipping image element outside of a page"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}
