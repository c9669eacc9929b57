#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_COORD: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A (longitude, latitude) pair in valid geographic range.
pub fn arb_lon_lat() -> impl Strategy<Value = (f64, f64)> {
    (-180.0f64..180.0, -90.0f64..90.0)
}

pub fn arb_lon_lats(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec(arb_lon_lat(), 0..=max)
}

/// Renders pairs as a KML `<coordinates>` body.
pub fn coordinates_text(pairs: &[(f64, f64)]) -> String {
    pairs
        .iter()
        .map(|(lon, lat)| format!("{lon},{lat}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens that never parse as a coordinate.
pub fn arb_bad_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bad-token".to_string()),
        Just("1".to_string()),
        Just("x,y".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Hex digit strings of the lengths a KML color may have.
pub fn arb_color_hex() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-f]{3}",
        "[0-9a-f]{4}",
        "[0-9a-f]{6}",
        "[0-9a-fA-F]{8}",
    ]
}

pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
