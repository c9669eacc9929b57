//! Renderable output records.
//!
//! These are the values a mapping UI consumes: point annotations (markers)
//! and overlays (polygons, lines, circles). Nothing here knows about a
//! particular toolkit; [`Overlay::render_style`] reduces an overlay's style
//! list to the handful of attributes every toolkit needs.

use std::collections::BTreeMap;

use serde::Serialize;

use super::coord::Coordinate;
use super::style::{Color, Style};

/// Custom key/value metadata from `<ExtendedData>`.
pub type ExtendedData = BTreeMap<String, String>;

/// A single-point marker.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointAnnotation {
    pub coordinate: Coordinate,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<ExtendedData>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolygonOverlay {
    /// Outer boundary, closed (first == last).
    pub coordinates: Vec<Coordinate>,
    /// Interior boundaries. Always empty until inner rings are parsed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interior_polygons: Vec<Vec<Coordinate>>,
    pub styles: Vec<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<ExtendedData>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineOverlay {
    pub coordinates: Vec<Coordinate>,
    pub styles: Vec<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<ExtendedData>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleOverlay {
    pub center: Coordinate,
    /// Radius in meters.
    pub radius: f64,
    pub styles: Vec<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<ExtendedData>,
}

/// An area or line shaped record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Overlay {
    Polygon(PolygonOverlay),
    Line(LineOverlay),
    Circle(CircleOverlay),
}

impl Overlay {
    pub fn kind(&self) -> &'static str {
        match self {
            Overlay::Polygon(_) => "polygon",
            Overlay::Line(_) => "line",
            Overlay::Circle(_) => "circle",
        }
    }

    pub fn styles(&self) -> &[Style] {
        match self {
            Overlay::Polygon(p) => &p.styles,
            Overlay::Line(l) => &l.styles,
            Overlay::Circle(c) => &c.styles,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Overlay::Polygon(p) => p.title.as_deref(),
            Overlay::Line(_) => None,
            Overlay::Circle(c) => c.title.as_deref(),
        }
    }

    pub fn extended_data(&self) -> Option<&ExtendedData> {
        match self {
            Overlay::Polygon(p) => p.extended_data.as_ref(),
            Overlay::Line(l) => l.extended_data.as_ref(),
            Overlay::Circle(c) => c.extended_data.as_ref(),
        }
    }

    /// Folds the style list into concrete drawing attributes.
    ///
    /// Later styles override earlier ones. Lines only honour `Line`
    /// styles; polygons and circles also honour `Poly`.
    pub fn render_style(&self) -> RenderStyle {
        let mut outline = true;
        let mut fill = true;
        let mut line_width = 0.0;
        let mut stroke_color = Color::CLEAR;
        let mut fill_color = Color::CLEAR;
        let is_area = !matches!(self, Overlay::Line(_));

        for style in self.styles() {
            match style {
                Style::Line { color, width } => {
                    line_width = *width;
                    stroke_color = *color;
                }
                Style::Poly {
                    color,
                    fill: poly_fill,
                    outline: poly_outline,
                } if is_area => {
                    outline = *poly_outline;
                    fill = *poly_fill;
                    fill_color = *color;
                }
                _ => {}
            }
        }

        RenderStyle {
            stroke_color: outline.then_some(stroke_color),
            line_width: if outline { line_width } else { 0.0 },
            fill_color: (is_area && fill).then_some(fill_color),
        }
    }
}

/// Toolkit-independent drawing attributes for an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderStyle {
    /// Outline color, `None` when the outline is disabled.
    pub stroke_color: Option<Color>,
    pub line_width: f64,
    /// Fill color, `None` for lines or when fill is disabled.
    pub fill_color: Option<Color>,
}

/// One record produced from a feature, before partitioning.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Annotation(PointAnnotation),
    Overlay(Overlay),
}

/// The result of a successful parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParseOutput {
    pub annotations: Vec<PointAnnotation>,
    pub overlays: Vec<Overlay>,
}

impl ParseOutput {
    /// Routes a record into the annotation or overlay bucket.
    pub fn push(&mut self, record: Record) {
        match record {
            Record::Annotation(annotation) => self.annotations.push(annotation),
            Record::Overlay(overlay) => self.overlays.push(overlay),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.overlays.is_empty()
    }
}

impl Extend<Record> for ParseOutput {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}
