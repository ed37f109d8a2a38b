//! Application configuration
//!
//! Loaded in layers: built-in defaults, an optional `config` file in the
//! working directory (TOML, YAML or JSON), then `WAYPOINT_` environment
//! variables with `__` between nesting levels, e.g.
//! `WAYPOINT_GEOCODING__BASE_URL` or `WAYPOINT_VIEW__STREET_ZOOM`.

use application::{SessionConfig, SuggestionConfig, ViewConfig};
use integration_geocoding::NominatimConfig;
use serde::{Deserialize, Serialize};

use crate::adapters::GeolocationConfig;
use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "WAYPOINT";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Nominatim geocoding service
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Camera behavior
    #[serde(default)]
    pub view: ViewConfig,

    /// Suggestion debouncing
    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Device position for "use current location"
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("config").required(false))
    }

    /// Load configuration from the given file source, overridden by the
    /// environment
    pub fn load_with<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a description naming the section of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.view.validate().map_err(|e| format!("view: {e}"))?;
        self.geolocation
            .position()
            .map_err(|e| format!("geolocation: {e}"))?;
        self.telemetry
            .validate()
            .map_err(|e| format!("telemetry: {e}"))?;
        Ok(())
    }

    /// The part of the configuration a map session needs
    #[must_use]
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            view: self.view.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};

    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        AppConfig::load_with(File::from_str(toml, FileFormat::Toml)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.geocoding.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.view.street_zoom, 13);
        assert_eq!(config.suggestions.debounce_ms, 300);
        assert!(config.geolocation.allowed);
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.view.default_zoom, 2);
        assert_eq!(config.view.bounds_padding_px, 50);
        assert_eq!(config.geocoding.max_results, 10);
    }

    #[test]
    fn test_file_overrides() {
        let config = from_toml(
            r#"
            [geocoding]
            base_url = "http://localhost:8080"
            country_filter = "in"

            [view]
            street_zoom = 15
            fly_duration_ms = 500

            [view.default_center]
            latitude = 22.0
            longitude = 79.0

            [suggestions]
            debounce_ms = 150

            [geolocation]
            latitude = 28.6139
            longitude = 77.209
            "#,
        );

        assert_eq!(config.geocoding.base_url, "http://localhost:8080");
        assert_eq!(config.geocoding.country_filter, "in");
        assert_eq!(config.view.street_zoom, 15);
        assert!((config.view.default_center.latitude() - 22.0).abs() < f64::EPSILON);
        assert_eq!(config.suggestions.debounce_ms, 150);
        assert!(config.geolocation.position().unwrap().is_some());
        assert!(config.validate().is_ok());

        let session = config.session();
        assert_eq!(session.view.fly_duration_ms, 500);
        assert_eq!(session.suggestions.debounce_ms, 150);
    }

    #[test]
    fn test_validate_names_section() {
        let mut config = AppConfig::default();
        config.geocoding.user_agent = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("geocoding:"));

        let mut config = AppConfig::default();
        config.view.street_zoom = 40;
        assert!(config.validate().unwrap_err().starts_with("view:"));

        let mut config = AppConfig::default();
        config.geolocation.longitude = Some(10.0);
        assert!(config.validate().unwrap_err().starts_with("geolocation:"));
    }

    #[test]
    fn test_serialization_roundtrip_keeps_sections() {
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        for section in ["geocoding", "view", "suggestions", "geolocation", "telemetry"] {
            assert!(json.contains(section), "missing {section}");
        }
    }
}
