//! Canonical location state of a map session
//!
//! Holds the `selected`, `source` and `destination` slots. Every setter is a
//! pure replace of one slot; the state also remembers which slot was written
//! last so the camera can follow the most recent single-point change.

use serde::{Deserialize, Serialize};

use crate::distance;
use crate::value_objects::{Coordinate, Slot};

/// Three independent optional coordinate slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    selected: Option<Coordinate>,
    source: Option<Coordinate>,
    destination: Option<Coordinate>,
    focus: Option<Slot>,
}

impl LocationState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state seeded with a selected coordinate
    #[must_use]
    pub fn with_selected(coordinate: Coordinate) -> Self {
        let mut state = Self::default();
        state.set_selected(coordinate);
        state
    }

    /// Replace the selected slot
    pub fn set_selected(&mut self, coordinate: Coordinate) {
        self.set(Slot::Selected, coordinate);
    }

    /// Replace the source slot
    pub fn set_source(&mut self, coordinate: Coordinate) {
        self.set(Slot::Source, coordinate);
    }

    /// Replace the destination slot
    pub fn set_destination(&mut self, coordinate: Coordinate) {
        self.set(Slot::Destination, coordinate);
    }

    /// Replace the given slot
    pub fn set(&mut self, slot: Slot, coordinate: Coordinate) {
        *self.slot_mut(slot) = Some(coordinate);
        self.focus = Some(slot);
    }

    /// Empty the given slot, returning its previous value
    pub fn clear(&mut self, slot: Slot) -> Option<Coordinate> {
        let previous = self.slot_mut(slot).take();
        if self.focus == Some(slot) {
            self.focus = None;
        }
        previous
    }

    /// Empty every slot
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The selected coordinate
    #[must_use]
    pub const fn selected(&self) -> Option<&Coordinate> {
        self.selected.as_ref()
    }

    /// The source coordinate
    #[must_use]
    pub const fn source(&self) -> Option<&Coordinate> {
        self.source.as_ref()
    }

    /// The destination coordinate
    #[must_use]
    pub const fn destination(&self) -> Option<&Coordinate> {
        self.destination.as_ref()
    }

    /// The coordinate in the given slot
    #[must_use]
    pub const fn get(&self, slot: Slot) -> Option<&Coordinate> {
        match slot {
            Slot::Selected => self.selected.as_ref(),
            Slot::Source => self.source.as_ref(),
            Slot::Destination => self.destination.as_ref(),
        }
    }

    /// The slot written most recently, if it still holds a value
    #[must_use]
    pub const fn focus(&self) -> Option<Slot> {
        self.focus
    }

    /// True when no slot is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.selected.is_none() && self.source.is_none() && self.destination.is_none()
    }

    /// The source/destination pair, when both are set
    #[must_use]
    pub fn pair(&self) -> Option<(&Coordinate, &Coordinate)> {
        self.source.as_ref().zip(self.destination.as_ref())
    }

    /// True when both source and destination are set
    #[must_use]
    pub const fn has_pair(&self) -> bool {
        self.source.is_some() && self.destination.is_some()
    }

    /// Straight-line distance between source and destination in kilometers
    #[must_use]
    pub fn route_distance_km(&self) -> Option<f64> {
        distance::estimate(self.source.as_ref(), self.destination.as_ref())
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Coordinate> {
        match slot {
            Slot::Selected => &mut self.selected,
            Slot::Source => &mut self.source,
            Slot::Destination => &mut self.destination,
        }
    }
}
