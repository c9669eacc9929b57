//! Geographic coordinate values.

use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
///
/// KML writes coordinates as `longitude,latitude[,altitude]`; this type
/// stores them the other way around, matching the convention most mapping
/// toolkits use. Equality is exact field equality, which is what ring
/// closure checks rely on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate from latitude and longitude degrees.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(52.37, 4.89);
        assert_eq!(coord.latitude, 52.37);
        assert_eq!(coord.longitude, 4.89);
    }

    #[test]
    fn test_coordinate_equality_is_exact() {
        assert_eq!(Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 2.0));
        assert_ne!(Coordinate::new(1.0, 2.0), Coordinate::new(1.0, 2.000_000_1));
    }

    #[test]
    fn test_coordinate_is_finite() {
        assert!(Coordinate::new(10.0, 20.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 20.0).is_finite());
        assert!(!Coordinate::new(10.0, f64::INFINITY).is_finite());
    }
}
