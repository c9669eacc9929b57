//! Behavioral guarantees of the KML parser, exercised end to end.

use kmlparse::kml::decode::{parse_color, parse_coordinates};
use kmlparse::kml::{
    from_kml_str, Color, Coordinate, KmlOptions, KmlParser, Overlay, ParseOutput, Style,
};
use kmlparse::{KmlError, XmlError};

fn parse(xml: &str) -> Result<ParseOutput, KmlError> {
    from_kml_str(xml, &KmlOptions::default())
}

fn polygon_document(coordinates: &str) -> String {
    format!(
        "<kml><Placemark><Polygon><outerBoundaryIs><LinearRing>\
         <coordinates>{coordinates}</coordinates>\
         </LinearRing></outerBoundaryIs></Polygon></Placemark></kml>"
    )
}

const POINT_DOCUMENT: &str =
    "<kml><Placemark><Point><coordinates>1,2</coordinates></Point></Placemark></kml>";

#[test]
fn unclosed_outer_ring_fails_polygon_construction() {
    let err = parse(&polygon_document("0,0 1,0 1,1")).unwrap_err();
    assert!(
        matches!(err, KmlError::PolygonConstruction(_)),
        "expected PolygonConstruction, got {err:?}"
    );
}

#[test]
fn closed_outer_ring_keeps_every_coordinate() {
    let output = parse(&polygon_document("0,0 1,0 1,1 0,1 0,0")).expect("parse");
    let [Overlay::Polygon(polygon)] = output.overlays.as_slice() else {
        panic!("expected one polygon, got {:?}", output.overlays);
    };
    assert_eq!(polygon.coordinates.len(), 5);
    assert_eq!(polygon.coordinates.first(), polygon.coordinates.last());
}

#[test]
fn zero_radius_keeps_points_as_annotations() {
    let output = parse(POINT_DOCUMENT).expect("parse");
    assert!(output.overlays.is_empty());
    assert_eq!(output.annotations.len(), 1);
    assert_eq!(output.annotations[0].coordinate, Coordinate::new(2.0, 1.0));
}

#[test]
fn positive_radius_turns_points_into_circles() {
    let options = KmlOptions::with_point_to_circle_radius(1000.0);
    let output = from_kml_str(POINT_DOCUMENT, &options).expect("parse");
    assert!(output.annotations.is_empty());
    let [Overlay::Circle(circle)] = output.overlays.as_slice() else {
        panic!("expected one circle, got {:?}", output.overlays);
    };
    assert_eq!(circle.center, Coordinate::new(2.0, 1.0));
    assert_eq!(circle.radius, 1000.0);
}

#[test]
fn eight_digit_colors_are_abgr() {
    let color = parse_color("ff0000ff");
    assert_eq!(color, Color::rgba(1.0, 0.0, 0.0, 1.0));

    // Blue lives in the second byte, not the last.
    let blue = parse_color("ffff0000");
    assert_eq!(blue, Color::rgba(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn placemark_resolves_style_map_to_normal_style() {
    let xml = r##"<kml><Document>
        <Style id="a"><LineStyle><color>ff0000ff</color><width>3</width></LineStyle></Style>
        <StyleMap id="m">
          <Pair><key>normal</key><styleUrl>#a</styleUrl></Pair>
        </StyleMap>
        <Placemark>
          <styleUrl>#m</styleUrl>
          <LineString><coordinates>0,0 1,1</coordinates></LineString>
        </Placemark>
    </Document></kml>"##;

    let output = parse(xml).expect("parse");
    let [Overlay::Line(line)] = output.overlays.as_slice() else {
        panic!("expected one line, got {:?}", output.overlays);
    };
    assert_eq!(
        line.styles,
        vec![Style::Line {
            color: Color::rgba(1.0, 0.0, 0.0, 1.0),
            width: 3.0,
        }]
    );
}

#[test]
fn multi_geometry_flattens_into_overlay_and_annotation() {
    let xml = r#"<kml><Placemark><name>Harbour</name><MultiGeometry>
        <Polygon><outerBoundaryIs><LinearRing>
          <coordinates>0,0 1,0 1,1 0,0</coordinates>
        </LinearRing></outerBoundaryIs></Polygon>
        <Point><coordinates>0.5,0.5</coordinates></Point>
    </MultiGeometry></Placemark></kml>"#;

    let output = parse(xml).expect("parse");
    assert_eq!(output.overlays.len(), 1);
    assert_eq!(output.annotations.len(), 1);
    assert!(matches!(output.overlays[0], Overlay::Polygon(_)));
    assert_eq!(output.annotations[0].title, "Harbour");
}

#[test]
fn extended_data_stays_with_its_placemark() {
    let xml = r#"<kml><Document>
        <Placemark>
          <ExtendedData><Data name="height"><value>12</value></Data></ExtendedData>
          <Point><coordinates>0,0</coordinates></Point>
        </Placemark>
        <Placemark>
          <ExtendedData><Data name="owner"><value>city</value></Data></ExtendedData>
          <Point><coordinates>1,1</coordinates></Point>
        </Placemark>
    </Document></kml>"#;

    let output = parse(xml).expect("parse");
    let first = output.annotations[0].extended_data.as_ref().expect("first data");
    let second = output.annotations[1].extended_data.as_ref().expect("second data");

    assert_eq!(first.keys().collect::<Vec<_>>(), ["height"]);
    assert_eq!(second.keys().collect::<Vec<_>>(), ["owner"]);
    assert!(first.keys().all(|key| !second.contains_key(key)));
}

#[test]
fn truncated_document_fails_without_payload() {
    let mut result = None;
    KmlParser::parse(
        b"<kml><Placemark><Point><coordinates>1,2</coordinates>",
        None,
        |r| result = Some(r),
    );

    match result.expect("completion called") {
        Err(KmlError::Parse(XmlError::UnclosedElement { element })) => {
            assert_eq!(element, "Point")
        }
        other => panic!("expected a parse failure, got {other:?}"),
    }
}

#[test]
fn unterminated_tag_is_a_parse_failure() {
    let err = parse("<kml><Placemark><name>Broken</name").unwrap_err();
    assert!(matches!(err, KmlError::Parse(_)), "got {err:?}");
}

#[test]
fn coordinates_stop_at_first_bad_token() {
    assert_eq!(
        parse_coordinates("1,2 3,4 bad-token 5,6"),
        vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
    );
}
