//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod geolocation_port;
mod map_surface_port;
mod notification_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geolocation_port::MockGeolocationPort;
pub use geolocation_port::GeolocationPort;
#[cfg(test)]
pub use map_surface_port::MockMapSurfacePort;
pub use map_surface_port::{CameraCommand, MapEvent, MapSurfacePort, MoveOrigin};
#[cfg(test)]
pub use notification_port::MockNotificationPort;
pub use notification_port::{Notice, NoticeLevel, NotificationPort};
