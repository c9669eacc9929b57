use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kmlparse operations.
#[derive(Debug, Error)]
pub enum KmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse KML: {0}")]
    Parse(#[from] XmlError),

    #[error("Polygon construction error: {0}")]
    PolygonConstruction(String),

    #[error("Failed to load options from {path}: {message}")]
    OptionsLoad { path: PathBuf, message: String },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

/// Transport-level failures of the XML event source.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// A malformed, duplicated or badly escaped attribute; `position` is
    /// the byte offset just past the tag that carries it.
    #[error("invalid attribute in tag ending at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("unexpected end of document: <{element}> was never closed")]
    UnclosedElement { element: String },
}
