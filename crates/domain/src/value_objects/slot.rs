//! Location slots and the input fields that write them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three coordinate slots of a location state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The single searched or current location
    Selected,
    /// Start of a source/destination pair
    Source,
    /// End of a source/destination pair
    Destination,
}

impl Slot {
    /// All slots in presentation order
    pub const ALL: [Self; 3] = [Self::Selected, Self::Source, Self::Destination];

    /// The input field whose text mirrors this slot
    #[must_use]
    pub const fn field(self) -> FieldId {
        match self {
            Self::Selected => FieldId::Single,
            Self::Source => FieldId::Source,
            Self::Destination => FieldId::Destination,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected => write!(f, "selected"),
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A text input field with its own suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// The main search bar
    Single,
    /// The source input of the travel panel
    Source,
    /// The destination input of the travel panel
    Destination,
}

impl FieldId {
    /// All fields
    pub const ALL: [Self; 3] = [Self::Single, Self::Source, Self::Destination];

    /// The slot a selection from this field writes
    #[must_use]
    pub const fn slot(self) -> Slot {
        match self {
            Self::Single => Slot::Selected,
            Self::Source => Slot::Source,
            Self::Destination => Slot::Destination,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}
