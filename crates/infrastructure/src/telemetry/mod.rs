//! Logging infrastructure
//!
//! Sets up the global `tracing` subscriber: an environment-aware level
//! filter and a human-readable or JSON formatter.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
