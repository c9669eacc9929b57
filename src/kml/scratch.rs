//! Typed working storage for values under construction.
//!
//! Character data and finished child elements are parked here until an
//! enclosing element closes and promotes them. Each accessor removes the
//! entry it returns, so a value is consumed at most once.

use std::collections::BTreeMap;

use super::coord::Coordinate;
use super::geometry::{Geometry, LinearRing};
use super::style::Color;

/// What a scratch entry holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScratchKey {
    Name,
    Description,
    StyleUrl,
    Coordinates,
    Color,
    Width,
    Fill,
    Outline,
    Href,
    BgColor,
    TextColor,
    LinearRing,
    OuterBoundary,
    Geometry,
}

/// A value under construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ScratchValue {
    Text(String),
    Coordinates(Vec<Coordinate>),
    Float(f64),
    Bool(bool),
    Color(Color),
    Ring(LinearRing),
    Geometry(Geometry),
}

#[derive(Clone, Debug, Default)]
pub struct ScratchTable {
    entries: BTreeMap<ScratchKey, ScratchValue>,
}

impl ScratchTable {
    pub fn insert(&mut self, key: ScratchKey, value: ScratchValue) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: ScratchKey) {
        self.entries.remove(&key);
    }

    pub fn contains(&self, key: ScratchKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = ScratchKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn take_text(&mut self, key: ScratchKey) -> Option<String> {
        match self.entries.remove(&key)? {
            ScratchValue::Text(text) => Some(text),
            other => self.put_back(key, other),
        }
    }

    pub fn take_coordinates(&mut self) -> Option<Vec<Coordinate>> {
        match self.entries.remove(&ScratchKey::Coordinates)? {
            ScratchValue::Coordinates(coords) => Some(coords),
            other => self.put_back(ScratchKey::Coordinates, other),
        }
    }

    pub fn take_float(&mut self, key: ScratchKey) -> Option<f64> {
        match self.entries.remove(&key)? {
            ScratchValue::Float(value) => Some(value),
            other => self.put_back(key, other),
        }
    }

    pub fn take_bool(&mut self, key: ScratchKey) -> Option<bool> {
        match self.entries.remove(&key)? {
            ScratchValue::Bool(value) => Some(value),
            other => self.put_back(key, other),
        }
    }

    pub fn take_color(&mut self, key: ScratchKey) -> Option<Color> {
        match self.entries.remove(&key)? {
            ScratchValue::Color(color) => Some(color),
            other => self.put_back(key, other),
        }
    }

    pub fn take_ring(&mut self, key: ScratchKey) -> Option<LinearRing> {
        match self.entries.remove(&key)? {
            ScratchValue::Ring(ring) => Some(ring),
            other => self.put_back(key, other),
        }
    }

    pub fn take_geometry(&mut self) -> Option<Geometry> {
        match self.entries.remove(&ScratchKey::Geometry)? {
            ScratchValue::Geometry(geometry) => Some(geometry),
            other => self.put_back(ScratchKey::Geometry, other),
        }
    }

    // A mistyped entry stays where it was and reads as absent.
    fn put_back<T>(&mut self, key: ScratchKey, value: ScratchValue) -> Option<T> {
        self.entries.insert(key, value);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_entry() {
        let mut table = ScratchTable::default();
        table.insert(ScratchKey::Width, ScratchValue::Float(2.0));

        assert_eq!(table.take_float(ScratchKey::Width), Some(2.0));
        assert_eq!(table.take_float(ScratchKey::Width), None);
        assert!(table.is_empty());
    }

    #[test]
    fn mistyped_take_leaves_entry() {
        let mut table = ScratchTable::default();
        table.insert(ScratchKey::Fill, ScratchValue::Bool(true));

        assert_eq!(table.take_float(ScratchKey::Fill), None);
        assert!(table.contains(ScratchKey::Fill));
        assert_eq!(table.take_bool(ScratchKey::Fill), Some(true));
    }

    #[test]
    fn coordinates_round_through_table() {
        let mut table = ScratchTable::default();
        let coords = vec![Coordinate::new(1.0, 2.0)];
        table.insert(
            ScratchKey::Coordinates,
            ScratchValue::Coordinates(coords.clone()),
        );
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![ScratchKey::Coordinates]);
        assert_eq!(table.take_coordinates(), Some(coords));
    }
}
