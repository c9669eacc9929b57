//! Parse result inspection and statistics.
//!
//! This module analyzes the output of a KML parse and produces a
//! structured report with record counts, styling coverage, an extended
//! data key histogram and the geographic bounds of everything parsed.

mod report;

pub use report::{BoundsSection, DataKeyCount, DataKeysSection, InspectReport, SummarySection};

use std::collections::HashMap;

use crate::kml::{Coordinate, ExtendedData, Overlay, ParseOutput};

/// Options for parse-result inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of top extended data keys to show in the histogram.
    pub top_keys: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            top_keys: 10,
            bar_width: 20,
        }
    }
}

/// Inspect a parse result and produce a report.
pub fn inspect_output(output: &ParseOutput, opts: &InspectOptions) -> InspectReport {
    InspectReport {
        summary: compute_summary(output),
        data_keys: compute_data_keys(output, opts.top_keys),
        bounds: compute_bounds(output),
        bar_width: opts.bar_width,
    }
}

fn compute_summary(output: &ParseOutput) -> SummarySection {
    let mut summary = SummarySection {
        annotations: output.annotations.len(),
        overlays: output.overlays.len(),
        ..SummarySection::default()
    };

    for overlay in &output.overlays {
        match overlay {
            Overlay::Polygon(p) => {
                summary.polygons += 1;
                summary.vertices += p.coordinates.len();
            }
            Overlay::Line(l) => {
                summary.lines += 1;
                summary.vertices += l.coordinates.len();
            }
            Overlay::Circle(_) => summary.circles += 1,
        }
        if !overlay.styles().is_empty() {
            summary.styled_overlays += 1;
        }
    }
    summary.vertices += output.annotations.len();

    summary
}

/// Count how many records carry each extended data key.
fn compute_data_keys(output: &ParseOutput, top_n: usize) -> DataKeysSection {
    let records_with_data: Vec<&ExtendedData> = output
        .annotations
        .iter()
        .filter_map(|a| a.extended_data.as_ref())
        .chain(output.overlays.iter().filter_map(Overlay::extended_data))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for data in &records_with_data {
        for key in data.keys() {
            *counts.entry(key.as_str()).or_insert(0) += 1;
        }
    }

    // Count descending, then key ascending for deterministic output
    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total_distinct = sorted.len();
    let other_count = sorted.iter().skip(top_n).map(|(_, count)| count).sum();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(key, count)| DataKeyCount {
            key: key.to_string(),
            count,
        })
        .collect();

    DataKeysSection {
        top_n,
        total_distinct,
        records_with_data: records_with_data.len(),
        entries,
        other_count,
    }
}

fn compute_bounds(output: &ParseOutput) -> Option<BoundsSection> {
    let mut bounds: Option<BoundsSection> = None;

    let mut include = |coord: &Coordinate| {
        if !coord.is_finite() {
            return;
        }
        let b = bounds.get_or_insert(BoundsSection {
            min_latitude: coord.latitude,
            max_latitude: coord.latitude,
            min_longitude: coord.longitude,
            max_longitude: coord.longitude,
        });
        b.min_latitude = b.min_latitude.min(coord.latitude);
        b.max_latitude = b.max_latitude.max(coord.latitude);
        b.min_longitude = b.min_longitude.min(coord.longitude);
        b.max_longitude = b.max_longitude.max(coord.longitude);
    };

    for annotation in &output.annotations {
        include(&annotation.coordinate);
    }
    for overlay in &output.overlays {
        match overlay {
            Overlay::Polygon(p) => p.coordinates.iter().for_each(&mut include),
            Overlay::Line(l) => l.coordinates.iter().for_each(&mut include),
            Overlay::Circle(c) => include(&c.center),
        }
    }

    bounds
}
