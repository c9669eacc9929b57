//! Placemark features and their conversion into output records.

use super::geometry::{Circle, Geometry, Polygon};
use super::output::{
    CircleOverlay, ExtendedData, LineOverlay, Overlay, PointAnnotation, PolygonOverlay, Record,
};
use super::style::Style;

/// A `<Placemark>` as collected by the parser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placemark {
    pub name: Option<String>,
    pub description: Option<String>,
    pub geometry: Option<Geometry>,
    /// The raw `<styleUrl>` reference, e.g. `#red-line`.
    pub style_id: Option<String>,
    pub extended_data: Option<ExtendedData>,
}

impl Placemark {
    /// Converts the placemark into renderable records.
    ///
    /// `styles` is the already-resolved style list. Points never carry
    /// styles, and lines do not carry a title or subtitle. Children of a
    /// MultiGeometry go through [`child_records`], which passes on less of
    /// the placemark's metadata.
    pub fn records(&self, styles: &[Style]) -> Vec<Record> {
        let Some(geometry) = &self.geometry else {
            return Vec::new();
        };

        match geometry {
            Geometry::Polygon(polygon) => vec![Record::Overlay(Overlay::Polygon(PolygonOverlay {
                title: self.name.clone(),
                subtitle: self.description.clone(),
                extended_data: self.extended_data.clone(),
                ..polygon_overlay(polygon, styles)
            }))],
            Geometry::LineString(coordinates) => vec![Record::Overlay(Overlay::Line(LineOverlay {
                coordinates: coordinates.clone(),
                styles: styles.to_vec(),
                extended_data: self.extended_data.clone(),
            }))],
            Geometry::Point(coordinate) => vec![Record::Annotation(PointAnnotation {
                coordinate: *coordinate,
                title: self.name.clone().unwrap_or_default(),
                subtitle: self.description.clone().unwrap_or_default(),
                extended_data: self.extended_data.clone(),
            })],
            Geometry::Circle(circle) => vec![Record::Overlay(Overlay::Circle(CircleOverlay {
                title: self.name.clone(),
                subtitle: self.description.clone(),
                extended_data: self.extended_data.clone(),
                ..circle_overlay(circle, styles)
            }))],
            Geometry::MultiGeometry(elements) => {
                let mut records = Vec::new();
                for element in elements {
                    child_records(element, self, styles, &mut records);
                }
                records
            }
            Geometry::LinearRing(_) => Vec::new(),
        }
    }
}

// Extended data never reaches MultiGeometry children, and only points keep
// the placemark's name and description.
fn child_records(geometry: &Geometry, parent: &Placemark, styles: &[Style], out: &mut Vec<Record>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(Record::Overlay(Overlay::Polygon(
            polygon_overlay(polygon, styles),
        ))),
        Geometry::Point(coordinate) => out.push(Record::Annotation(PointAnnotation {
            coordinate: *coordinate,
            title: parent.name.clone().unwrap_or_default(),
            subtitle: parent.description.clone().unwrap_or_default(),
            extended_data: None,
        })),
        Geometry::LineString(coordinates) => out.push(Record::Overlay(Overlay::Line(LineOverlay {
            coordinates: coordinates.clone(),
            styles: styles.to_vec(),
            extended_data: None,
        }))),
        Geometry::Circle(circle) => {
            out.push(Record::Overlay(Overlay::Circle(circle_overlay(circle, styles))))
        }
        Geometry::MultiGeometry(elements) => {
            for element in elements {
                child_records(element, parent, styles, out);
            }
        }
        Geometry::LinearRing(_) => {}
    }
}

fn polygon_overlay(polygon: &Polygon, styles: &[Style]) -> PolygonOverlay {
    PolygonOverlay {
        coordinates: polygon.outer.coordinates().to_vec(),
        interior_polygons: Vec::new(),
        styles: styles.to_vec(),
        title: None,
        subtitle: None,
        extended_data: None,
    }
}

fn circle_overlay(circle: &Circle, styles: &[Style]) -> CircleOverlay {
    CircleOverlay {
        center: circle.center,
        radius: circle.radius,
        styles: styles.to_vec(),
        title: None,
        subtitle: None,
        extended_data: None,
    }
}
