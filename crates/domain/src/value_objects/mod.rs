//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod geo_location;
mod slot;

pub use coordinate::Coordinate;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use slot::{FieldId, Slot};
