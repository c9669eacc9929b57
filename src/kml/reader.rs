//! KML reader: feeds `quick-xml` events into a [`ParseSession`].

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::options::KmlOptions;
use super::output::ParseOutput;
use super::session::ParseSession;
use crate::error::{KmlError, XmlError};

/// Callback-style entry point.
///
/// The parse runs synchronously; `completion` is invoked exactly once,
/// before `parse` returns, with either the parsed output or the reason the
/// document was rejected.
pub struct KmlParser;

impl KmlParser {
    pub fn parse<F>(data: &[u8], options: Option<KmlOptions>, completion: F)
    where
        F: FnOnce(Result<ParseOutput, KmlError>),
    {
        let options = options.unwrap_or_default();
        completion(from_kml_slice(data, &options));
    }
}

/// Read a KML file into annotations and overlays.
pub fn read_kml(path: &Path, options: &KmlOptions) -> Result<ParseOutput, KmlError> {
    let bytes = fs::read(path)?;
    from_kml_slice(&bytes, options)
}

/// Parse KML from bytes (must be valid UTF-8).
pub fn from_kml_slice(bytes: &[u8], options: &KmlOptions) -> Result<ParseOutput, KmlError> {
    let xml = std::str::from_utf8(bytes).map_err(XmlError::from)?;
    from_kml_str(xml, options)
}

/// Parse KML from a string.
pub fn from_kml_str(xml: &str, options: &KmlOptions) -> Result<ParseOutput, KmlError> {
    let mut session = ParseSession::new(options.clone());
    drive(xml, &mut session)?;
    Ok(session.end_document())
}

/// Runs every event of `xml` through `session`.
///
/// Fails on XML syntax errors, on elements still open at end of input, and
/// on semantic errors raised by the session.
pub fn drive(xml: &str, session: &mut ParseSession) -> Result<(), KmlError> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<String> = Vec::new();

    tracing::debug!(
        bytes = xml.len(),
        point_to_circle_radius = session.options().point_to_circle_radius,
        "parsing KML document"
    );
    session.start_document();

    loop {
        let event = reader.read_event().map_err(|source| XmlError::Syntax {
            position: reader.error_position(),
            source,
        })?;

        match event {
            Event::Start(e) => {
                let name = element_name(e.local_name().as_ref());
                let attrs = attributes(&e, reader.buffer_position())?;
                session.start_element(&name, &attrs);
                open.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(e.local_name().as_ref());
                let attrs = attributes(&e, reader.buffer_position())?;
                session.start_element(&name, &attrs);
                session.end_element(&name)?;
            }
            Event::End(e) => {
                open.pop();
                session.end_element(&element_name(e.local_name().as_ref()))?;
            }
            Event::Text(e) => session.characters(&String::from_utf8_lossy(e.as_ref())),
            Event::CData(e) => session.characters(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => session.characters(&resolved),
                    None => tracing::debug!(%entity, "skipping unknown entity reference"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.pop() {
        return Err(XmlError::UnclosedElement { element }.into());
    }
    Ok(())
}

fn element_name(local: &[u8]) -> String {
    String::from_utf8_lossy(local).into_owned()
}

// Attribute syntax is only checked while iterating, so every error (and
// every value that fails to unescape) has to surface here.
fn attributes(e: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>, XmlError> {
    let invalid = |source: quick_xml::Error| XmlError::Attribute { position, source };

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| invalid(err.into()))?;
        let value = attr.unescape_value().map_err(invalid)?;
        attrs.push((
            String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(attrs)
}

fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code).map(|c| c.to_string())
}
