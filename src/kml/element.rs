//! The KML element vocabulary and the open-element path.

/// Every element name the state machine reacts to.
///
/// Names outside this set are skipped: they are neither pushed onto the
/// path nor allowed to receive character data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Document,
    Folder,
    Placemark,
    Name,
    Description,
    MultiGeometry,
    StyleUrl,
    ExtendedData,
    Data,
    Value,
    Polygon,
    Point,
    OuterBoundaryIs,
    InnerBoundaryIs,
    LinearRing,
    Tessellate,
    Coordinates,
    LineString,
    Style,
    StyleMap,
    Pair,
    Key,
    LineStyle,
    PolyStyle,
    LabelStyle,
    IconStyle,
    Icon,
    Href,
    BalloonStyle,
    BgColor,
    TextColor,
    Color,
    Width,
    Fill,
    Outline,
}

impl Element {
    /// Looks up an element by its local (unprefixed) tag name.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        let element = match name {
            b"Document" => Element::Document,
            b"Folder" => Element::Folder,
            b"Placemark" => Element::Placemark,
            b"name" => Element::Name,
            b"description" => Element::Description,
            b"MultiGeometry" => Element::MultiGeometry,
            b"styleUrl" => Element::StyleUrl,
            b"ExtendedData" => Element::ExtendedData,
            b"Data" => Element::Data,
            b"value" => Element::Value,
            b"Polygon" => Element::Polygon,
            b"Point" => Element::Point,
            b"outerBoundaryIs" => Element::OuterBoundaryIs,
            b"innerBoundaryIs" => Element::InnerBoundaryIs,
            b"LinearRing" => Element::LinearRing,
            b"tessellate" => Element::Tessellate,
            b"coordinates" => Element::Coordinates,
            b"LineString" => Element::LineString,
            b"Style" => Element::Style,
            b"StyleMap" => Element::StyleMap,
            b"Pair" => Element::Pair,
            b"key" => Element::Key,
            b"LineStyle" => Element::LineStyle,
            b"PolyStyle" => Element::PolyStyle,
            b"LabelStyle" => Element::LabelStyle,
            b"IconStyle" => Element::IconStyle,
            b"Icon" => Element::Icon,
            b"href" => Element::Href,
            b"BalloonStyle" => Element::BalloonStyle,
            b"bgColor" => Element::BgColor,
            b"textColor" => Element::TextColor,
            b"color" => Element::Color,
            b"width" => Element::Width,
            b"fill" => Element::Fill,
            b"outline" => Element::Outline,
            _ => return None,
        };
        Some(element)
    }

    /// Geometry containers that scope a nested `<coordinates>`.
    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Element::Polygon | Element::LinearRing | Element::Point | Element::LineString
        )
    }
}

/// The stack of currently open elements, root first.
#[derive(Clone, Debug, Default)]
pub struct ElementPath {
    elements: Vec<Element>,
}

impl ElementPath {
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    /// The element enclosing the innermost open one.
    pub fn parent(&self) -> Option<Element> {
        let len = self.elements.len();
        if len < 2 {
            return None;
        }
        Some(self.elements[len - 2])
    }

    /// The innermost open element matching `predicate`, searching outward.
    pub fn nearest(&self, predicate: impl Fn(Element) -> bool) -> Option<Element> {
        self.elements.iter().rev().copied().find(|e| predicate(*e))
    }

    /// The innermost open geometry or `Pair` element.
    ///
    /// A `<key>` only names a style-map slot when this is `Pair`.
    pub fn nearest_geometry_or_pair(&self) -> Option<Element> {
        self.nearest(|e| e.is_geometry() || e == Element::Pair)
    }

    /// Renders the path as `Document:Placemark:Point` for diagnostics.
    pub fn display(&self) -> String {
        self.elements
            .iter()
            .map(|e| format!("{e:?}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}
