//! Fuzz target for KML document parsing.
//!
//! Feeds arbitrary bytes through the full streaming parser, checking for
//! panics or hangs. Both point handling modes are exercised.
//!
//! Run with:
//!   cargo +nightly fuzz run kml_parse

#![no_main]

use kmlparse::kml::{from_kml_slice, KmlOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_kml_slice(data, &KmlOptions::default());
    let _ = from_kml_slice(data, &KmlOptions::with_point_to_circle_radius(100.0));
});
