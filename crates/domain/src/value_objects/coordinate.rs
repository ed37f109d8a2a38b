//! Named coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geo_location::{GeoLocation, InvalidCoordinates};

/// A named latitude/longitude pair
///
/// Coordinates are immutable; a location slot is updated by replacing the
/// whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    name: String,
    location: GeoLocation,
}

impl Coordinate {
    /// Create a coordinate with range validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude or longitude is out of range
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        Ok(Self {
            name: name.into(),
            location: GeoLocation::new(lat, lon)?,
        })
    }

    /// Create a coordinate from an already validated location
    #[must_use]
    pub fn from_location(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.latitude()
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.longitude()
    }

    /// The underlying position
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Great-circle distance to another coordinate in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        self.location.distance_km(&other.location)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.location)
    }
}
