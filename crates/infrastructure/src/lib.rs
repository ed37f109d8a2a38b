//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: Nominatim geocoding,
//! configured device position and notice delivery. Also owns configuration
//! loading, logging setup and the wiring of a map session.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::build_map_session;
pub use config::AppConfig;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
