//! Geocoding suggestion entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, GeoLocation};

/// A geocoding search result candidate shown before the user picks one
///
/// `id` is unique within one result batch only; batches keep the order the
/// geocoding service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    /// Service-assigned identifier
    pub id: String,
    /// Human-readable place name
    pub display_name: String,
    /// Position of the place
    pub location: GeoLocation,
}

impl SuggestionEntry {
    /// Create a new suggestion entry
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            location,
        }
    }

    /// Convert into the coordinate a selection writes
    #[must_use]
    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::from_location(self.display_name.clone(), self.location)
    }
}

impl From<&SuggestionEntry> for Coordinate {
    fn from(entry: &SuggestionEntry) -> Self {
        entry.to_coordinate()
    }
}

impl From<SuggestionEntry> for Coordinate {
    fn from(entry: SuggestionEntry) -> Self {
        Self::from_location(entry.display_name, entry.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_coordinate() {
        let entry = SuggestionEntry::new(
            "1",
            "Mumbai, India",
            GeoLocation::new(19.076, 72.8777).unwrap(),
        );
        let coord = Coordinate::from(&entry);
        assert_eq!(coord.name(), "Mumbai, India");
        assert!((coord.lat() - 19.076).abs() < f64::EPSILON);
        assert!((coord.lon() - 72.8777).abs() < f64::EPSILON);

        let owned: Coordinate = entry.into();
        assert_eq!(owned, coord);
    }
}
