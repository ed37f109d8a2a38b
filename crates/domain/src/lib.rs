//! Domain layer for Waypoint
//!
//! Contains the location model shared by every other crate: validated
//! coordinates, geocoding suggestions, the three-slot location state and the
//! great-circle distance estimate. This layer performs no I/O.

pub mod distance;
pub mod entities;
pub mod errors;
pub mod overlay;
pub mod value_objects;

pub use distance::{EARTH_RADIUS_KM, estimate, format_distance_km, haversine_km};
pub use entities::*;
pub use errors::DomainError;
pub use overlay::{MapOverlay, Marker};
pub use value_objects::*;
