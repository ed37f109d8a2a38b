//! Application layer - Use cases and orchestration
//!
//! Contains the location/view synchronization logic: debounced suggestion
//! sessions, the camera controller and the top-level map session, plus the
//! port definitions through which they reach the geocoding service, the map
//! surface, device geolocation and user notifications.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
