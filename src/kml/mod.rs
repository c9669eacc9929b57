//! KML parsing: from a KML document to map annotations and overlays.
//!
//! Parsing is a single streaming pass. XML events drive a state machine
//! ([`ParseSession`]) that keeps a path of open elements and a scratch table
//! of half-built values; geometries, styles and placemarks are assembled as
//! their elements close. When the document ends, each placemark's style
//! reference is resolved (through a style map's `normal` slot if needed)
//! and its geometry is turned into output records.
//!
//! # Design Principles
//!
//! 1. **Toolkit Independence**: Output records describe shapes and styles;
//!    nothing assumes a particular map renderer.
//!
//! 2. **Best-Effort Extraction**: Malformed-but-harmless input (an unclosed
//!    ring, an invalid color, a partial style) is dropped or defaulted
//!    rather than failing the whole document. Only malformed XML and a
//!    polygon without an outer boundary are errors.
//!
//! 3. **Explicit Session State**: All per-document state lives in one
//!    [`ParseSession`], so parses are independent of each other.
//!
//! # Example
//!
//! ```
//! use kmlparse::kml::{from_kml_str, KmlOptions};
//!
//! let kml = r#"<kml><Placemark>
//!     <name>Dam Square</name>
//!     <Point><coordinates>4.8931,52.3731</coordinates></Point>
//! </Placemark></kml>"#;
//!
//! let output = from_kml_str(kml, &KmlOptions::default()).unwrap();
//! assert_eq!(output.annotations[0].title, "Dam Square");
//! assert!(output.overlays.is_empty());
//! ```

mod coord;
pub mod decode;
mod element;
mod feature;
mod geometry;
mod options;
mod output;
pub mod reader;
mod scratch;
mod session;
mod style;

// Re-export core types for convenient access
pub use coord::Coordinate;
pub use element::{Element, ElementPath};
pub use feature::Placemark;
pub use geometry::{Circle, Geometry, LinearRing, Polygon};
pub use options::KmlOptions;
pub use output::{
    CircleOverlay, ExtendedData, LineOverlay, Overlay, ParseOutput, PointAnnotation,
    PolygonOverlay, Record, RenderStyle,
};
pub use reader::{from_kml_slice, from_kml_str, read_kml, KmlParser};
pub use session::{ParseSession, ANONYMOUS_STYLE_ID};
pub use style::{Color, Style, StyleMap, HIGHLIGHT_SLOT, NORMAL_SLOT};
