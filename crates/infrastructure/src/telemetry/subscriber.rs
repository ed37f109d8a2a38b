//! Tracing subscriber initialization

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "application=debug,integration_geocoding=trace")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per event instead of formatted lines
    #[serde(default)]
    pub json: bool,

    /// Include source file and line in each event
    #[serde(default)]
    pub with_location: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
            with_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description when the log filter cannot be parsed.
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.log_filter)
            .map(|_| ())
            .map_err(|e| format!("invalid log_filter '{}': {e}", self.log_filter))
    }
}

/// Install the global tracing subscriber
///
/// Can only succeed once per process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(e.to_string()))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(config.with_location)
                    .with_line_number(config.with_location),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(config.with_location)
                    .with_line_number(config.with_location),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(json = config.json, "Telemetry initialized");
    Ok(())
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The log filter could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),
}
