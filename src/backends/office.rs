//! Office Open XML package reader.
//!
//! A DOCX file is a zip archive of XML parts linked by relationship parts
//! (`_rels/*.rels`). This module reads:
//! - the relationships of the main document part and the parts they target
//! - the text runs of the main document part
//! - core (`docProps/core.xml`) and extended (`docProps/app.xml`) properties

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{ExtractionError, PackageReader, Relationship};
use crate::utils::xml;

/// Main document part used when `_rels/.rels` does not name one.
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const PACKAGE_RELS: &str = "_rels/.rels";
const CORE_PROPERTIES: &str = "docProps/core.xml";
const APP_PROPERTIES: &str = "docProps/app.xml";

/// Reader for DOCX (and other OOXML) packages.
#[derive(Debug, Default, Clone)]
pub struct OfficePackage;

impl OfficePackage {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<ZipArchive<File>, ExtractionError> {
        Ok(ZipArchive::new(File::open(path)?)?)
    }

    /// Read a part as bytes; `None` if the package has no such part.
    fn read_part(
        archive: &mut ZipArchive<File>,
        part_name: &str,
    ) -> Result<Option<Vec<u8>>, ExtractionError> {
        let mut entry = match archive.by_name(part_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    fn read_part_string(
        archive: &mut ZipArchive<File>,
        part_name: &str,
    ) -> Result<Option<String>, ExtractionError> {
        Ok(Self::read_part(archive, part_name)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Name of the main document part, from the package relationships.
    fn main_part_name(archive: &mut ZipArchive<File>) -> Result<String, ExtractionError> {
        let Some(rels) = Self::read_part_string(archive, PACKAGE_RELS)? else {
            return Ok(DEFAULT_MAIN_PART.to_string());
        };

        Ok(parse_relationships(&rels)?
            .into_iter()
            .find(|rel| !rel.external && rel.rel_type.ends_with("/officeDocument"))
            .map(|rel| resolve_part_name("", &rel.target_ref))
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()))
    }

    /// Plain text of the main document part.
    pub fn document_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let mut archive = Self::open(path)?;
        let main_part = Self::main_part_name(&mut archive)?;
        let document = Self::read_part_string(&mut archive, &main_part)?
            .ok_or_else(|| ExtractionError::MissingPart(main_part.clone()))?;
        document_xml_text(&document)
    }

    /// Core and extended document properties.
    pub fn properties(&self, path: &Path) -> Result<BTreeMap<String, String>, ExtractionError> {
        let mut archive = Self::open(path)?;
        let mut properties = BTreeMap::new();

        if let Some(core) = Self::read_part_string(&mut archive, CORE_PROPERTIES)? {
            properties.extend(leaf_elements(&core, "")?);
        }
        if let Some(app) = Self::read_part_string(&mut archive, APP_PROPERTIES)? {
            properties.extend(leaf_elements(&app, "extended-properties:")?);
        }

        Ok(properties)
    }
}

impl PackageReader for OfficePackage {
    fn name(&self) -> &'static str {
        "ooxml"
    }

    fn relationships(&self, path: &Path) -> Result<Vec<Relationship>, ExtractionError> {
        let mut archive = Self::open(path)?;
        let main_part = Self::main_part_name(&mut archive)?;
        let rels_part = rels_part_name(&main_part);

        match Self::read_part_string(&mut archive, &rels_part)? {
            Some(rels) => parse_relationships(&rels),
            None => {
                tracing::debug!("{} has no relationship part {}", path.display(), rels_part);
                Ok(Vec::new())
            }
        }
    }

    fn read_blob(
        &self,
        path: &Path,
        relationship: &Relationship,
    ) -> Result<Vec<u8>, ExtractionError> {
        if relationship.external {
            return Err(ExtractionError::MissingPart(format!(
                "{} is an external target",
                relationship.target_ref
            )));
        }

        let mut archive = Self::open(path)?;
        let main_part = Self::main_part_name(&mut archive)?;
        let part_name = resolve_part_name(parent_dir(&main_part), &relationship.target_ref);

        Self::read_part(&mut archive, &part_name)?.ok_or(ExtractionError::MissingPart(part_name))
    }
}

/// Parse `<Relationship>` elements of a relationship part, in document order.
fn parse_relationships(rels_xml: &str) -> Result<Vec<Relationship>, ExtractionError> {
    let mut reader = Reader::from_str(rels_xml);
    let mut buf = Vec::new();
    let mut relationships = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"Relationship" => {
                if let Some(rel) = relationship(e)? {
                    relationships.push(rel);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

fn relationship(element: &BytesStart<'_>) -> Result<Option<Relationship>, ExtractionError> {
    let Some(target_ref) = xml::attribute(element, "Target")? else {
        return Ok(None);
    };

    Ok(Some(Relationship {
        id: xml::attribute(element, "Id")?.unwrap_or_default(),
        rel_type: xml::attribute(element, "Type")?.unwrap_or_default(),
        target_ref,
        external: xml::attribute(element, "TargetMode")?
            .is_some_and(|mode| mode.eq_ignore_ascii_case("External")),
    }))
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`.
fn rels_part_name(part_name: &str) -> String {
    let dir = parent_dir(part_name);
    let file = part_name.rsplit('/').next().unwrap_or(part_name);
    if dir.is_empty() {
        format!("_rels/{}.rels", file)
    } else {
        format!("{}/_rels/{}.rels", dir, file)
    }
}

fn parent_dir(part_name: &str) -> &str {
    part_name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets (`/word/media/x.png`) start from the package root. `.` and
/// `..` segments are collapsed.
fn resolve_part_name(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let (start, rest) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base_dir, target),
    };

    for segment in start.split('/').chain(rest.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}

/// Text of a WordprocessingML body: runs joined, one line per paragraph.
fn document_xml_text(document_xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(document_xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(ref e) if in_text => text.push_str(&xml::text(e)?),
            Event::CData(e) if in_text => text.push_str(&xml::cdata(e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim_matches('\n').to_string())
}

/// Non-empty leaf elements of a properties part, keyed by qualified name.
fn leaf_elements(
    part_xml: &str,
    key_prefix: &str,
) -> Result<BTreeMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_str(part_xml);
    let mut buf = Vec::new();
    let mut open: Vec<(String, String, bool)> = Vec::new();
    let mut properties = BTreeMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if let Some(parent) = open.last_mut() {
                    parent.2 = true;
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                open.push((name, String::new(), false));
            }
            Event::Text(ref e) => {
                if let Some(current) = open.last_mut() {
                    current.1.push_str(&xml::text(e)?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = open.last_mut() {
                    current.1.push_str(&xml::cdata(e));
                }
            }
            Event::End(_) => {
                if let Some((name, value, has_children)) = open.pop() {
                    let value = value.trim();
                    if !has_children && !value.is_empty() {
                        properties.insert(format!("{}{}", key_prefix, name), value.to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(properties)
}
