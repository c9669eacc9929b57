//! Display styles and style-map indirection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// One style entry attached to a style id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Style {
    Line {
        color: Color,
        width: f64,
    },
    Poly {
        color: Color,
        fill: bool,
        outline: bool,
    },
    Balloon {
        background_color: Color,
        text_color: Color,
    },
    Icon {
        url: String,
    },
}

/// Slot consulted when resolving a style map for rendering.
pub const NORMAL_SLOT: &str = "normal";
/// Slot filled by the second `<Pair>` of a style map.
pub const HIGHLIGHT_SLOT: &str = "highlight";

/// Maps logical states (`normal`, `highlight`) to style ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    slots: BTreeMap<String, String>,
}

impl StyleMap {
    /// Registers a slot named by a `<key>` without touching slots that
    /// already hold a style id.
    pub fn declare_slot(&mut self, key: &str) {
        self.slots.entry(key.to_string()).or_default();
    }

    /// Stores a `<styleUrl>` from a `<Pair>`.
    ///
    /// Assignment is positional: the first style id goes to `normal`, any
    /// later one to `highlight`. Input is assumed to list the `normal` pair
    /// first; the `<key>` text does not pick the slot.
    pub fn assign(&mut self, style_id: &str) {
        let slot = if self.filled_slots() == 0 {
            NORMAL_SLOT
        } else {
            HIGHLIGHT_SLOT
        };
        self.slots.insert(slot.to_string(), style_id.to_string());
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots
            .get(slot)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn normal(&self) -> Option<&str> {
        self.get(NORMAL_SLOT)
    }

    pub fn highlight(&self) -> Option<&str> {
        self.get(HIGHLIGHT_SLOT)
    }

    fn filled_slots(&self) -> usize {
        self.slots.values().filter(|id| !id.is_empty()).count()
    }
}
