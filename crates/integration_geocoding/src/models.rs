//! Geocoding models
//!
//! Typed results plus the raw Nominatim JSON shapes they are parsed from.

use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// A place returned by the geocoding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Service identifier (Nominatim `place_id`)
    pub place_id: String,
    /// Full human-readable name
    pub display_name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Nominatim returns `place_id` as a number, some mirrors as a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPlaceId {
    Number(u64),
    Text(String),
}

impl RawPlaceId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Raw Nominatim search/reverse result
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub place_id: Option<RawPlaceId>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub display_name: Option<String>,
    pub error: Option<String>,
}

impl RawPlace {
    /// Convert into a typed place, parsing the numeric-string coordinates
    ///
    /// An entry without `place_id` is rejected, since the id is what tells
    /// places of one batch apart.
    pub(crate) fn into_place(self) -> Result<Place, GeocodingError> {
        let place_id = self
            .place_id
            .map(RawPlaceId::into_string)
            .ok_or_else(|| GeocodingError::ParseError("Missing place_id".to_string()))?;
        let latitude = parse_coordinate(self.lat.as_deref(), "latitude")?;
        let longitude = parse_coordinate(self.lon.as_deref(), "longitude")?;
        let display_name = self
            .display_name
            .ok_or_else(|| GeocodingError::ParseError("Missing display_name".to_string()))?;

        Ok(Place {
            place_id,
            display_name,
            latitude,
            longitude,
        })
    }
}

fn parse_coordinate(raw: Option<&str>, field: &str) -> Result<f64, GeocodingError> {
    raw.ok_or_else(|| GeocodingError::ParseError(format!("Missing {field}")))?
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodingError::ParseError(format!("Invalid {field}")))
}
