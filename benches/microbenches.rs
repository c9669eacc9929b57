//! Criterion microbenches for kmlparse.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Whole-document parsing (from_kml_str, from_kml_slice)
//! - Coordinate block decoding (parse_coordinates)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use kmlparse::kml::decode::parse_coordinates;
use kmlparse::kml::{from_kml_slice, from_kml_str, KmlOptions};

// Include test fixtures at compile time (no file I/O during benchmark)
const CAMPUS_FIXTURE: &str = include_str!("../tests/fixtures/campus.kml");

/// A long track, one LineString with many vertices.
fn track_document(points: usize) -> String {
    let coordinates: Vec<String> = (0..points)
        .map(|i| {
            let t = i as f64 / points as f64;
            format!("{:.6},{:.6},0", 4.8 + t * 0.2, 52.3 + (t * 12.0).sin() * 0.05)
        })
        .collect();
    format!(
        "<kml><Placemark><name>Track</name><LineString><coordinates>{}</coordinates>\
         </LineString></Placemark></kml>",
        coordinates.join(" ")
    )
}

/// Benchmark KML parsing from string.
fn bench_kml_parse_str(c: &mut Criterion) {
    let options = KmlOptions::default();
    let mut group = c.benchmark_group("kml_parse");
    group.throughput(Throughput::Bytes(CAMPUS_FIXTURE.len() as u64));

    group.bench_function("from_kml_str", |b| {
        b.iter(|| {
            let output = from_kml_str(black_box(CAMPUS_FIXTURE), &options).unwrap();
            black_box(output)
        })
    });

    group.finish();
}

/// Benchmark KML parsing from byte slice (includes UTF-8 validation).
fn bench_kml_parse_slice(c: &mut Criterion) {
    let bytes = CAMPUS_FIXTURE.as_bytes();
    let options = KmlOptions::with_point_to_circle_radius(100.0);
    let mut group = c.benchmark_group("kml_parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("from_kml_slice", |b| {
        b.iter(|| {
            let output = from_kml_slice(black_box(bytes), &options).unwrap();
            black_box(output)
        })
    });

    group.finish();
}

/// Benchmark a single large LineString document.
fn bench_kml_parse_track(c: &mut Criterion) {
    let track = track_document(10_000);
    let options = KmlOptions::default();
    let mut group = c.benchmark_group("kml_parse");
    group.throughput(Throughput::Bytes(track.len() as u64));

    group.bench_function("track_10k", |b| {
        b.iter(|| {
            let output = from_kml_str(black_box(&track), &options).unwrap();
            black_box(output)
        })
    });

    group.finish();
}

/// Benchmark coordinate decoding alone.
fn bench_parse_coordinates(c: &mut Criterion) {
    let text: String = (0..1_000)
        .map(|i| format!("{:.6},{:.6},0 ", 4.8 + i as f64 * 1e-4, 52.3))
        .collect();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1_000));

    group.bench_function("parse_coordinates", |b| {
        b.iter(|| black_box(parse_coordinates(black_box(&text))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_kml_parse_str,
    bench_kml_parse_slice,
    bench_kml_parse_track,
    bench_parse_coordinates
);
criterion_main!(benches);
