//! Map overlay derived from a location state
//!
//! Describes what the map shell draws on top of the tiles: one marker per
//! occupied slot and a straight line joining source and destination.

use serde::{Deserialize, Serialize};

use crate::entities::LocationState;
use crate::value_objects::{GeoLocation, Slot};

/// A marker with its popup label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Slot the marker represents
    pub slot: Slot,
    /// Marker position
    pub position: GeoLocation,
    /// Popup text
    pub label: String,
}

/// Markers and route line for the current state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapOverlay {
    /// Markers in slot order (selected, source, destination)
    pub markers: Vec<Marker>,
    /// Straight line from source to destination
    pub route: Option<[GeoLocation; 2]>,
}

impl MapOverlay {
    /// Build the overlay for a state
    #[must_use]
    pub fn from_state(state: &LocationState) -> Self {
        let markers = Slot::ALL
            .into_iter()
            .filter_map(|slot| {
                state.get(slot).map(|coordinate| Marker {
                    slot,
                    position: coordinate.location(),
                    label: popup_label(slot, coordinate.name()),
                })
            })
            .collect();

        let route = state
            .pair()
            .map(|(source, destination)| [source.location(), destination.location()]);

        Self { markers, route }
    }

    /// True when nothing is drawn
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.route.is_none()
    }
}

fn popup_label(slot: Slot, name: &str) -> String {
    let name = name.trim();
    match slot {
        Slot::Selected if name.is_empty() => "Selected Location".to_string(),
        Slot::Selected => name.to_string(),
        Slot::Source if name.is_empty() => "Source: Selected Source".to_string(),
        Slot::Source => format!("Source: {name}"),
        Slot::Destination if name.is_empty() => "Destination: Selected Destination".to_string(),
        Slot::Destination => format!("Destination: {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Coordinate;

    #[test]
    fn empty_state_draws_nothing() {
        let overlay = MapOverlay::from_state(&LocationState::new());
        assert!(overlay.is_empty());
    }

    #[test]
    fn single_marker_without_route() {
        let state = LocationState::with_selected(Coordinate::new("Mumbai, India", 19.076, 72.8777).unwrap());
        let overlay = MapOverlay::from_state(&state);
        assert_eq!(overlay.markers.len(), 1);
        assert_eq!(overlay.markers[0].slot, Slot::Selected);
        assert_eq!(overlay.markers[0].label, "Mumbai, India");
        assert!(overlay.route.is_none());
    }

    #[test]
    fn pair_draws_route_and_labels() {
        let mut state = LocationState::new();
        state.set_source(Coordinate::new("Mumbai", 19.076, 72.8777).unwrap());
        state.set_destination(Coordinate::new("", 28.6139, 77.2090).unwrap());

        let overlay = MapOverlay::from_state(&state);
        let labels: Vec<&str> = overlay.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Source: Mumbai", "Destination: Selected Destination"]);

        let route = overlay.route.unwrap();
        assert!((route[0].latitude() - 19.076).abs() < f64::EPSILON);
        assert!((route[1].latitude() - 28.6139).abs() < f64::EPSILON);
    }

    #[test]
    fn unnamed_selected_uses_fallback_label() {
        let state = LocationState::with_selected(Coordinate::new(" ", 1.0, 1.0).unwrap());
        let overlay = MapOverlay::from_state(&state);
        assert_eq!(overlay.markers[0].label, "Selected Location");
    }
}
