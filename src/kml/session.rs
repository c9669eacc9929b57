//! The streaming KML state machine.
//!
//! A [`ParseSession`] consumes one document's worth of XML events
//! (start-tag, character data, end-tag) and builds features as elements
//! close. It owns every piece of per-document state: the open-element
//! path, the scratch table of half-built values, the style tables and the
//! collected placemarks. Nothing is shared between sessions.
//!
//! The event methods are public so that any XML tokenizer can drive a
//! session; [`crate::kml::reader`] wires it to `quick-xml`.
//!
//! Most malformed input is dropped quietly (an unclosed ring, a
//! `PolyStyle` missing a field, an invalid color). The one structural
//! error is a `Polygon` without an outer boundary, which aborts the parse.

use std::collections::HashMap;

use super::decode::{parse_bool, parse_color, parse_coordinates, parse_float};
use super::element::{Element, ElementPath};
use super::feature::Placemark;
use super::geometry::{Circle, Geometry, LinearRing, Polygon};
use super::options::KmlOptions;
use super::output::{ExtendedData, ParseOutput};
use super::scratch::{ScratchKey, ScratchTable, ScratchValue};
use super::style::{Color, Style, StyleMap};
use crate::error::KmlError;

/// Style id used for `LineStyle`s that appear outside a named `<Style>`.
pub const ANONYMOUS_STYLE_ID: &str = "";

const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Per-document parser state.
#[derive(Debug)]
pub struct ParseSession {
    options: KmlOptions,
    path: ElementPath,
    current: Option<Element>,
    text: String,
    scratch: ScratchTable,
    /// Open `<MultiGeometry>` groups, innermost last.
    open_groups: Vec<Vec<Geometry>>,
    current_style_id: Option<String>,
    current_style_map_id: Option<String>,
    current_data_key: Option<String>,
    extended_data: ExtendedData,
    features: Vec<Placemark>,
    styles: HashMap<String, Vec<Style>>,
    style_maps: HashMap<String, StyleMap>,
}

impl ParseSession {
    pub fn new(options: KmlOptions) -> Self {
        Self {
            options,
            path: ElementPath::default(),
            current: None,
            text: String::new(),
            scratch: ScratchTable::default(),
            open_groups: Vec::new(),
            current_style_id: None,
            current_style_map_id: None,
            current_data_key: None,
            extended_data: ExtendedData::new(),
            features: Vec::new(),
            styles: HashMap::new(),
            style_maps: HashMap::new(),
        }
    }

    pub fn options(&self) -> &KmlOptions {
        &self.options
    }

    /// Resets all state ahead of a new document.
    pub fn start_document(&mut self) {
        let options = self.options.clone();
        *self = Self::new(options);
    }

    /// Handles an opening tag. `name` is the local (unprefixed) tag name.
    pub fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        self.flush_text();

        let Some(element) = Element::from_name(name.as_bytes()) else {
            self.current = None;
            return;
        };
        self.current = Some(element);
        self.path.push(element);

        match element {
            Element::Placemark => self.discard_scratch("placemark start"),
            Element::MultiGeometry => self.open_groups.push(Vec::new()),
            Element::Style => {
                if let Some(id) = attribute(attributes, "id") {
                    let id = format!("#{id}");
                    self.styles.insert(id.clone(), Vec::new());
                    self.current_style_id = Some(id);
                }
            }
            Element::StyleMap => {
                if let Some(id) = attribute(attributes, "id") {
                    let id = format!("#{id}");
                    self.style_maps.insert(id.clone(), StyleMap::default());
                    self.current_style_map_id = Some(id);
                }
            }
            Element::ExtendedData => self.extended_data.clear(),
            Element::Data => {
                self.current_data_key = attribute(attributes, "name").map(str::to_string);
            }
            _ => {}
        }
    }

    /// Buffers character data for the current element.
    ///
    /// A text node may arrive in several pieces; they are joined and
    /// decoded once, when the next tag starts or ends.
    pub fn characters(&mut self, text: &str) {
        if self.current.is_some() {
            self.text.push_str(text);
        }
    }

    /// Handles a closing tag and promotes finished values.
    pub fn end_element(&mut self, name: &str) -> Result<(), KmlError> {
        self.flush_text();

        let Some(element) = Element::from_name(name.as_bytes()) else {
            self.current = None;
            return Ok(());
        };

        let result = self.close(element);
        self.path.pop();
        self.current = None;
        result
    }

    /// Resolves styles for every collected placemark and partitions the
    /// resulting records into annotations and overlays.
    pub fn end_document(mut self) -> ParseOutput {
        self.flush_text();

        let mut output = ParseOutput::default();
        for feature in &self.features {
            let styles = self.resolve_styles(feature.style_id.as_deref());
            output.extend(feature.records(styles));
        }

        tracing::debug!(
            features = self.features.len(),
            styles = self.styles.len(),
            style_maps = self.style_maps.len(),
            annotations = output.annotations.len(),
            overlays = output.overlays.len(),
            "finished KML document"
        );
        output
    }

    /// Placemarks collected so far.
    pub fn features(&self) -> &[Placemark] {
        &self.features
    }

    /// The styles a placemark with the given `styleUrl` renders with.
    ///
    /// A style-map id resolves through its `normal` slot. No reference
    /// means the anonymous style id. Unknown ids resolve to no styles.
    pub fn resolve_styles(&self, style_id: Option<&str>) -> &[Style] {
        let id = style_id.unwrap_or(ANONYMOUS_STYLE_ID);
        let id = self
            .style_maps
            .get(id)
            .and_then(StyleMap::normal)
            .unwrap_or(id);
        self.styles.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        if let Some(element) = self.current {
            self.dispatch_text(element, text);
        }
    }

    fn dispatch_text(&mut self, element: Element, text: String) {
        match element {
            Element::Value => {
                if let Some(key) = &self.current_data_key {
                    self.extended_data.insert(key.clone(), text);
                }
            }
            Element::Color => self.store_color(ScratchKey::Color, &text),
            Element::BgColor => self.store_color(ScratchKey::BgColor, &text),
            Element::TextColor => self.store_color(ScratchKey::TextColor, &text),
            Element::Width => {
                if let Some(width) = parse_float(&text) {
                    self.scratch
                        .insert(ScratchKey::Width, ScratchValue::Float(width));
                }
            }
            Element::Fill => self.store_bool(ScratchKey::Fill, &text),
            Element::Outline => self.store_bool(ScratchKey::Outline, &text),
            Element::Name => {
                let name = text.trim();
                if name.chars().count() > 1 {
                    self.scratch
                        .insert(ScratchKey::Name, ScratchValue::Text(name.to_string()));
                }
            }
            Element::Description => {
                self.scratch
                    .insert(ScratchKey::Description, ScratchValue::Text(text));
            }
            Element::StyleUrl => self.store_style_url(text.trim()),
            Element::Key => {
                if self.path.nearest_geometry_or_pair() == Some(Element::Pair) {
                    if let Some(map) = self.current_style_map_mut() {
                        map.declare_slot(text.trim());
                    }
                }
            }
            Element::Href => {
                self.scratch
                    .insert(ScratchKey::Href, ScratchValue::Text(text.trim().to_string()));
            }
            Element::Coordinates => {
                let coordinates = parse_coordinates(&text);
                if !coordinates.is_empty() {
                    self.scratch.insert(
                        ScratchKey::Coordinates,
                        ScratchValue::Coordinates(coordinates),
                    );
                }
            }
            _ => {}
        }
    }

    fn store_color(&mut self, key: ScratchKey, text: &str) {
        self.scratch
            .insert(key, ScratchValue::Color(parse_color(text)));
    }

    fn store_bool(&mut self, key: ScratchKey, text: &str) {
        if let Some(value) = parse_bool(text) {
            self.scratch.insert(key, ScratchValue::Bool(value));
        }
    }

    // Inside a StyleMap's <Pair> the reference fills a map slot; anywhere
    // else it is the enclosing placemark's own style.
    fn store_style_url(&mut self, url: &str) {
        if self.path.parent() == Some(Element::Pair) {
            if let Some(map) = self.current_style_map_mut() {
                map.assign(url);
            }
            return;
        }
        self.scratch
            .insert(ScratchKey::StyleUrl, ScratchValue::Text(url.to_string()));
    }

    fn current_style_map_mut(&mut self) -> Option<&mut StyleMap> {
        let id = self.current_style_map_id.as_ref()?;
        self.style_maps.get_mut(id)
    }

    fn close(&mut self, element: Element) -> Result<(), KmlError> {
        match element {
            Element::Style => self.current_style_id = None,
            Element::StyleMap => self.current_style_map_id = None,
            Element::LinearRing => self.close_linear_ring(),
            Element::InnerBoundaryIs => {
                if self.scratch.take_ring(ScratchKey::LinearRing).is_some() {
                    tracing::debug!("ignoring innerBoundaryIs ring");
                }
            }
            Element::OuterBoundaryIs => {
                if let Some(ring) = self.scratch.take_ring(ScratchKey::LinearRing) {
                    self.scratch
                        .insert(ScratchKey::OuterBoundary, ScratchValue::Ring(ring));
                }
            }
            Element::Polygon => self.close_polygon()?,
            Element::Point => self.close_point(),
            Element::LineString => {
                if let Some(coordinates) = self.scratch.take_coordinates() {
                    self.finish_geometry(Geometry::LineString(coordinates));
                }
            }
            Element::MultiGeometry => {
                if let Some(group) = self.open_groups.pop() {
                    self.finish_geometry(Geometry::MultiGeometry(group));
                }
            }
            Element::LineStyle => self.close_line_style(),
            Element::PolyStyle => self.close_poly_style(),
            // Label colors are not kept; drop them before a later LineStyle
            // picks them up.
            Element::LabelStyle => self.scratch.remove(ScratchKey::Color),
            Element::IconStyle => self.close_icon_style(),
            Element::BalloonStyle => self.close_balloon_style(),
            Element::Placemark => self.close_placemark(),
            _ => {}
        }
        Ok(())
    }

    fn close_linear_ring(&mut self) {
        let Some(coordinates) = self.scratch.take_coordinates() else {
            return;
        };
        match LinearRing::new(coordinates) {
            Some(ring) => self
                .scratch
                .insert(ScratchKey::LinearRing, ScratchValue::Ring(ring)),
            None => tracing::debug!(path = %self.path.display(), "dropping unclosed LinearRing"),
        }
    }

    fn close_polygon(&mut self) -> Result<(), KmlError> {
        let Some(outer) = self.scratch.take_ring(ScratchKey::OuterBoundary) else {
            return Err(KmlError::PolygonConstruction(
                "outerBoundaryIs is required for a polygon".to_string(),
            ));
        };
        self.finish_geometry(Geometry::Polygon(Polygon::new(outer)));
        Ok(())
    }

    fn close_point(&mut self) {
        let Some(coordinates) = self.scratch.take_coordinates() else {
            return;
        };
        let Some(&first) = coordinates.first() else {
            return;
        };

        let radius = self.options.point_to_circle_radius;
        let geometry = if radius > 0.0 {
            Geometry::Circle(Circle {
                center: first,
                radius,
            })
        } else {
            Geometry::Point(first)
        };
        self.finish_geometry(geometry);
    }

    // Finished shapes join the innermost open MultiGeometry, if any.
    fn finish_geometry(&mut self, geometry: Geometry) {
        match self.open_groups.last_mut() {
            Some(group) => group.push(geometry),
            None => self
                .scratch
                .insert(ScratchKey::Geometry, ScratchValue::Geometry(geometry)),
        }
    }

    fn close_line_style(&mut self) {
        let width = self
            .scratch
            .take_float(ScratchKey::Width)
            .unwrap_or(DEFAULT_LINE_WIDTH);
        let color = self
            .scratch
            .take_color(ScratchKey::Color)
            .unwrap_or(Color::WHITE);

        if self.current_style_id.is_none() {
            self.styles
                .insert(ANONYMOUS_STYLE_ID.to_string(), Vec::new());
            self.current_style_id = Some(ANONYMOUS_STYLE_ID.to_string());
        }
        if let Some(id) = &self.current_style_id {
            self.styles
                .entry(id.clone())
                .or_default()
                .push(Style::Line { color, width });
        }
    }

    fn close_poly_style(&mut self) {
        let outline = self.scratch.take_bool(ScratchKey::Outline);
        let fill = self.scratch.take_bool(ScratchKey::Fill);
        let color = self.scratch.take_color(ScratchKey::Color);

        match (outline, fill, color, &self.current_style_id) {
            (Some(outline), Some(fill), Some(color), Some(id)) => {
                self.styles
                    .entry(id.clone())
                    .or_default()
                    .push(Style::Poly {
                        color,
                        fill,
                        outline,
                    });
            }
            _ => tracing::debug!(
                style_id = ?self.current_style_id,
                "dropping incomplete PolyStyle"
            ),
        }
    }

    fn close_icon_style(&mut self) {
        let href = self.scratch.take_text(ScratchKey::Href);
        self.scratch.remove(ScratchKey::Color);

        if let (Some(url), Some(id)) = (href, &self.current_style_id) {
            self.styles
                .entry(id.clone())
                .or_default()
                .push(Style::Icon { url });
        }
    }

    fn close_balloon_style(&mut self) {
        let background_color = self
            .scratch
            .take_color(ScratchKey::BgColor)
            .unwrap_or(Color::WHITE);
        let text_color = self
            .scratch
            .take_color(ScratchKey::TextColor)
            .unwrap_or(Color::BLACK);
        self.scratch.remove(ScratchKey::Color);

        if let Some(id) = &self.current_style_id {
            self.styles
                .entry(id.clone())
                .or_default()
                .push(Style::Balloon {
                    background_color,
                    text_color,
                });
        }
    }

    fn close_placemark(&mut self) {
        let extended_data = if self.extended_data.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.extended_data))
        };

        let placemark = Placemark {
            name: self.scratch.take_text(ScratchKey::Name),
            description: self.scratch.take_text(ScratchKey::Description),
            geometry: self.scratch.take_geometry(),
            style_id: self.scratch.take_text(ScratchKey::StyleUrl),
            extended_data,
        };
        tracing::trace!(
            name = ?placemark.name,
            geometry = placemark.geometry.as_ref().map(Geometry::kind),
            "collected placemark"
        );

        self.features.push(placemark);
        self.discard_scratch("placemark end");
    }

    // Placemarks start and end with an empty scratch table so that
    // document-level names or a stray ring never attach to a feature.
    fn discard_scratch(&mut self, reason: &str) {
        if !self.scratch.is_empty() {
            let keys: Vec<ScratchKey> = self.scratch.keys().collect();
            tracing::trace!(?keys, reason, "discarding scratch entries");
            self.scratch.clear();
        }
        self.open_groups.clear();
        self.extended_data.clear();
        self.current_data_key = None;
    }
}

fn attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}
