//! Fuzz target for the character data decoders (coordinates, colors,
//! booleans and numbers).
//!
//! Run with:
//!   cargo +nightly fuzz run kml_decode_text

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        kmlparse::kml::decode::fuzz_decode_text(input);
    }
});
