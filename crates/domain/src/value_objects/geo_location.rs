//! Validated latitude/longitude pair

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distance;

const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A point on the globe, in degrees
///
/// Every map position in Waypoint goes through this type: slot values,
/// geocoding results, the device position and camera targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Latitude or longitude outside the valid range (or NaN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates;

impl GeoLocation {
    /// Validate and build a location
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when either value is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinates)
        }
    }

    /// Build a location from values already known to be in range
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        distance::haversine_km(*self, *other)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
