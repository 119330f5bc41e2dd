//! Helpers over `quick_xml` events for tool output and package parts.

use quick_xml::events::{BytesCData, BytesStart, BytesText};

/// Unescaped value of an attribute, if present.
pub fn attribute(element: &BytesStart<'_>, name: &str) -> quick_xml::Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Attribute parsed as a number; missing or malformed values give `None`.
pub fn numeric_attribute(element: &BytesStart<'_>, name: &str) -> quick_xml::Result<Option<f64>> {
    Ok(attribute(element, name)?.and_then(|v| v.trim().parse().ok()))
}

/// Character data of a text event, entities resolved.
pub fn text(event: &BytesText<'_>) -> quick_xml::Result<String> {
    Ok(event.unescape()?.into_owned())
}

/// Character data of a CDATA section, taken literally.
pub fn cdata(event: BytesCData<'_>) -> String {
    String::from_utf8_lossy(&event.into_inner()).into_owned()
}
