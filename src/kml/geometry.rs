//! Geometry values built from KML geometry elements.

use super::coord::Coordinate;

/// A closed sequence of coordinates bounding a polygon region.
///
/// The only way to obtain a ring is [`LinearRing::new`], which refuses
/// sequences whose first and last coordinates differ.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing {
    coordinates: Vec<Coordinate>,
}

impl LinearRing {
    /// Builds a ring, or returns `None` when `coordinates` is empty or not closed.
    pub fn new(coordinates: Vec<Coordinate>) -> Option<Self> {
        let first = coordinates.first()?;
        let last = coordinates.last()?;
        if first != last {
            return None;
        }
        Some(Self { coordinates })
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }
}

/// A polygon with a required outer boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub outer: LinearRing,
    /// Interior boundaries. `<innerBoundaryIs>` is not read yet, so the
    /// parser always leaves this empty.
    pub inner: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(outer: LinearRing) -> Self {
        Self {
            outer,
            inner: Vec::new(),
        }
    }
}

/// A circle synthesized from a `<Point>` when point-to-circle conversion is on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Coordinate,
    /// Radius in meters.
    pub radius: f64,
}

/// Every geometry shape the parser produces.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    LinearRing(LinearRing),
    Polygon(Polygon),
    Circle(Circle),
    MultiGeometry(Vec<Geometry>),
}

impl Geometry {
    /// Short lowercase name of the variant, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::LineString(_) => "line_string",
            Geometry::LinearRing(_) => "linear_ring",
            Geometry::Polygon(_) => "polygon",
            Geometry::Circle(_) => "circle",
            Geometry::MultiGeometry(_) => "multi_geometry",
        }
    }
}
