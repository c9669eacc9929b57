//! Inspect report types and terminal formatting.
//!
//! The report renders as boxed text for terminals and serializes to JSON
//! for programmatic use.

use std::fmt;

use serde::Serialize;

/// The result of inspecting a parse result.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Record counts.
    pub summary: SummarySection,
    /// Extended data key histogram.
    pub data_keys: DataKeysSection,
    /// Geographic extent, absent when nothing has finite coordinates.
    pub bounds: Option<BoundsSection>,
    /// Display options for formatting.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Record counts for a parse result.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    /// Point annotations (markers).
    pub annotations: usize,
    /// Overlays of any shape.
    pub overlays: usize,
    pub polygons: usize,
    pub lines: usize,
    pub circles: usize,
    /// Overlays with at least one resolved style.
    pub styled_overlays: usize,
    /// Coordinates across all records (circle centers excluded).
    pub vertices: usize,
}

/// Extended data key distribution.
#[derive(Clone, Debug, Serialize)]
pub struct DataKeysSection {
    /// How many top keys to show.
    pub top_n: usize,
    /// Distinct keys across all records.
    pub total_distinct: usize,
    /// Records carrying any extended data.
    pub records_with_data: usize,
    /// Top key entries (sorted by count descending).
    pub entries: Vec<DataKeyCount>,
    /// Sum of counts for keys not in the top N.
    pub other_count: usize,
}

/// A single extended data key with the number of records carrying it.
#[derive(Clone, Debug, Serialize)]
pub struct DataKeyCount {
    pub key: String,
    pub count: usize,
}

/// Bounding box of every finite coordinate, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundsSection {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│              🗺   KML Inspection Report                      │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;

        self.fmt_data_keys(f)?;
        writeln!(f)?;

        self.fmt_bounds(f)?;

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "┌─ Summary ─────────────────────────────────────────────────┐")?;
        writeln!(f, "│                                                           │")?;
        writeln!(
            f,
            "│   Annotations:   {:>8}                                 │",
            format_number(s.annotations)
        )?;
        writeln!(
            f,
            "│   Overlays:      {:>8}                                 │",
            format_number(s.overlays)
        )?;
        writeln!(
            f,
            "│     Polygons:    {:>8}                                 │",
            format_number(s.polygons)
        )?;
        writeln!(
            f,
            "│     Lines:       {:>8}                                 │",
            format_number(s.lines)
        )?;
        writeln!(
            f,
            "│     Circles:     {:>8}                                 │",
            format_number(s.circles)
        )?;
        writeln!(
            f,
            "│   Vertices:      {:>8}                                 │",
            format_number(s.vertices)
        )?;
        writeln!(f, "│                                                           │")?;
        writeln!(
            f,
            "│   Styled:        {:>8} of {:<8} ({:>6})             │",
            format_number(s.styled_overlays),
            format_number(s.overlays),
            fmt_percent(s.styled_overlays, s.overlays)
        )?;
        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }

    fn fmt_data_keys(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.data_keys;

        let header = if k.total_distinct > k.top_n {
            format!("Extended data (top {} of {})", k.top_n, k.total_distinct)
        } else {
            format!("Extended data ({})", k.total_distinct)
        };

        writeln!(f, "┌─ {} {}┐", header, "─".repeat(57usize.saturating_sub(header.len())))?;
        writeln!(f, "│                                                           │")?;

        if k.entries.is_empty() {
            writeln!(f, "│   No extended data found.                                 │")?;
        } else {
            // Find max count for bar scaling
            let max_count = k.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &k.entries {
                let bar = render_bar(entry.count, max_count, self.bar_width);
                writeln!(
                    f,
                    "│   {:<16} {:>7} {:>6}  {}│",
                    truncate_label(&entry.key, 16),
                    format_number(entry.count),
                    fmt_percent(entry.count, k.records_with_data),
                    pad_bar(&bar, self.bar_width)
                )?;
            }

            if k.other_count > 0 {
                let bar = render_bar(k.other_count, max_count, self.bar_width);
                writeln!(
                    f,
                    "│   {:<16} {:>7} {:>6}  {}│",
                    "(other)",
                    format_number(k.other_count),
                    "",
                    pad_bar(&bar, self.bar_width)
                )?;
            }
        }

        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }

    fn fmt_bounds(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Bounds ──────────────────────────────────────────────────┐")?;
        writeln!(f, "│                                                           │")?;

        match &self.bounds {
            Some(b) => {
                writeln!(
                    f,
                    "│   Latitude:     min {:>11.6}    max {:>11.6}       │",
                    b.min_latitude, b.max_latitude
                )?;
                writeln!(
                    f,
                    "│   Longitude:    min {:>11.6}    max {:>11.6}       │",
                    b.min_longitude, b.max_longitude
                )?;
            }
            None => {
                writeln!(f, "│   No coordinates found.                                   │")?;
            }
        }

        writeln!(f, "│                                                           │")?;
        writeln!(f, "└───────────────────────────────────────────────────────────┘")?;

        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a percentage, handling zero denominators.
fn fmt_percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (numerator as f64 / denominator as f64) * 100.0)
    }
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = (count * width) / max_count;
    let filled = filled.min(width); // Clamp to width

    // Use Unicode blocks for a nicer look
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Pad a bar string to ensure consistent column alignment.
fn pad_bar(bar: &str, width: usize) -> String {
    // Each Unicode char is 1 char, but we want consistent visual width
    let visual_len = bar.chars().count();
    let padding = (width + 2).saturating_sub(visual_len);
    format!("{}{}", bar, " ".repeat(padding))
}

/// Truncate a key to fit in the display column.
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
