//! Parser configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KmlError;

/// Options recognized by the parser.
///
/// Options can be built in code or loaded from a YAML (or JSON) file:
///
/// ```
/// use kmlparse::kml::KmlOptions;
///
/// let options = KmlOptions::from_yaml_str("point_to_circle_radius: 500").unwrap();
/// assert_eq!(options.point_to_circle_radius, 500.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmlOptions {
    /// When positive, every `<Point>` becomes a circle overlay of this
    /// radius (meters) instead of a point annotation.
    #[serde(alias = "pointToCircleRadius")]
    pub point_to_circle_radius: f64,
}

impl KmlOptions {
    pub fn with_point_to_circle_radius(radius: f64) -> Self {
        Self {
            point_to_circle_radius: radius,
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Loads options from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self, KmlError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw).map_err(|source| KmlError::OptionsLoad {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
    }
}
