//! Text-to-value decoders for KML character data.
//!
//! Every decoder here is lenient: malformed input produces `None`, a
//! truncated result, or a documented fallback, never an error. The state
//! machine decides what a missing value means.

use super::coord::Coordinate;
use super::style::Color;

/// Decodes a `<coordinates>` text block.
///
/// Tuples are separated by whitespace and written `lon,lat[,alt]`; the
/// altitude is ignored. Decoding stops at the first tuple without two
/// numeric fields and returns whatever came before it.
pub fn parse_coordinates(text: &str) -> Vec<Coordinate> {
    let mut coordinates = Vec::new();
    for token in text.split_whitespace() {
        match parse_tuple(token) {
            Some(coord) => coordinates.push(coord),
            None => {
                tracing::debug!(
                    token,
                    kept = coordinates.len(),
                    "stopping coordinate scan at malformed tuple"
                );
                break;
            }
        }
    }
    coordinates
}

fn parse_tuple(token: &str) -> Option<Coordinate> {
    let mut fields = token.split(',');
    let longitude = fields.next()?.parse::<f64>().ok()?;
    let latitude = fields.next()?.parse::<f64>().ok()?;
    Some(Coordinate::new(latitude, longitude))
}

/// Decodes a KML boolean (`1`/`0`, `true`/`false`, `yes`/`no`).
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Decodes a decimal number such as a `<width>` value.
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Decodes a hex color string.
///
/// Three and six digit forms are `RGB` with an opaque alpha. Four and
/// eight digit forms follow KML's `ABGR` byte order (`aabbggrr`), not the
/// more common `ARGB`. Anything else decodes to opaque black.
pub fn parse_color(text: &str) -> Color {
    let hex = text.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        tracing::warn!(value = text, "invalid hex color, using opaque black");
        return Color::BLACK;
    }

    let Ok(value) = u32::from_str_radix(hex, 16) else {
        tracing::warn!(value = text, "invalid hex color, using opaque black");
        return Color::BLACK;
    };

    let nibble = |shift: u32| f64::from((value >> shift) & 0xF) / 15.0;
    let byte = |shift: u32| f64::from((value >> shift) & 0xFF) / 255.0;

    match hex.len() {
        3 => Color::rgba(nibble(8), nibble(4), nibble(0), 1.0),
        4 => Color::rgba(nibble(0), nibble(4), nibble(8), nibble(12)),
        6 => Color::rgba(byte(16), byte(8), byte(0), 1.0),
        8 => Color::rgba(byte(0), byte(8), byte(16), byte(24)),
        len => {
            tracing::warn!(
                value = text,
                len,
                "hex color must have 3, 4, 6 or 8 digits, using opaque black"
            );
            Color::BLACK
        }
    }
}

/// Fuzz-only entrypoint running every text decoder over one input.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode_text(input: &str) {
    let _ = parse_coordinates(input);
    let _ = parse_bool(input);
    let _ = parse_float(input);
    let _ = parse_color(input);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_ignore_altitude() {
        let coords = parse_coordinates("4.89,52.37,0 4.90,52.38,12.5");
        assert_eq!(
            coords,
            vec![Coordinate::new(52.37, 4.89), Coordinate::new(52.38, 4.90)]
        );
    }

    #[test]
    fn coordinates_split_on_newlines_and_tabs() {
        let coords = parse_coordinates("\n\t1,2\n\t\t3,4\n");
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1], Coordinate::new(4.0, 3.0));
    }

    #[test]
    fn coordinates_stop_at_first_bad_tuple() {
        let coords = parse_coordinates("1,2 3,4 bad-token 5,6");
        assert_eq!(
            coords,
            vec![Coordinate::new(2.0, 1.0), Coordinate::new(4.0, 3.0)]
        );
    }

    #[test]
    fn coordinates_need_two_fields() {
        assert!(parse_coordinates("1").is_empty());
        assert!(parse_coordinates("1,").is_empty());
        assert!(parse_coordinates("").is_empty());
    }

    #[test]
    fn bool_accepts_common_spellings() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" yes "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn float_trims_whitespace() {
        assert_eq!(parse_float(" 2.5\n"), Some(2.5));
        assert_eq!(parse_float("wide"), None);
    }

    #[test]
    fn eight_digit_color_is_abgr() {
        let color = parse_color("ff0000ff");
        assert_eq!(color, Color::rgba(1.0, 0.0, 0.0, 1.0));

        let color = parse_color("7fff0000");
        assert_eq!(color.blue, 1.0);
        assert_eq!(color.red, 0.0);
        assert!((color.alpha - 127.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn four_digit_color_is_abgr() {
        let color = parse_color("f00f");
        assert_eq!(color, Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(parse_color("ff00"), Color::rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn rgb_forms_are_opaque() {
        assert_eq!(parse_color("f00"), Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(parse_color("00ff00"), Color::rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(parse_color("#0000ff"), Color::rgba(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn invalid_color_falls_back_to_black() {
        assert_eq!(parse_color("12345"), Color::BLACK);
        assert_eq!(parse_color("zzzzzz"), Color::BLACK);
        assert_eq!(parse_color(""), Color::BLACK);
        assert_eq!(parse_color("+fffff"), Color::BLACK);
        assert_eq!(parse_color("123456789"), Color::BLACK);
    }
}
