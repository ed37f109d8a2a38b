//! Fixed-position geolocation adapter
//!
//! Hosts without a positioning device get their "current location" from
//! configuration. An unset position reports `Unavailable`; a revoked
//! permission reports `PermissionDenied`.

use application::error::ApplicationError;
use application::ports::GeolocationPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the configured device position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Whether the user allows location access
    #[serde(default = "default_allowed")]
    pub allowed: bool,

    /// Latitude of the device position
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude of the device position
    #[serde(default)]
    pub longitude: Option<f64>,
}

const fn default_allowed() -> bool {
    true
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            allowed: default_allowed(),
            latitude: None,
            longitude: None,
        }
    }
}

impl GeolocationConfig {
    /// The configured position, if both coordinates are set and valid
    ///
    /// # Errors
    ///
    /// Returns a description when only one coordinate is set or the
    /// position is out of range.
    pub fn position(&self) -> Result<Option<GeoLocation>, String> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(None),
            (Some(lat), Some(lon)) => GeoLocation::new(lat, lon)
                .map(Some)
                .map_err(|e| e.to_string()),
            _ => Err("latitude and longitude must be set together".to_string()),
        }
    }
}

/// Geolocation source returning a configured position
#[derive(Debug, Clone)]
pub struct FixedGeolocation {
    position: Option<GeoLocation>,
    allowed: bool,
}

impl FixedGeolocation {
    /// A source that always reports the given position
    #[must_use]
    pub const fn at(position: GeoLocation) -> Self {
        Self {
            position: Some(position),
            allowed: true,
        }
    }

    /// A source without a position fix
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            position: None,
            allowed: true,
        }
    }

    /// A source whose permission was refused
    #[must_use]
    pub const fn denied() -> Self {
        Self {
            position: None,
            allowed: false,
        }
    }

    /// Build from configuration
    ///
    /// # Errors
    ///
    /// Returns a description when the configured position is invalid.
    pub fn from_config(config: &GeolocationConfig) -> Result<Self, String> {
        Ok(Self {
            position: config.position()?,
            allowed: config.allowed,
        })
    }
}

#[async_trait]
impl GeolocationPort for FixedGeolocation {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        if !self.allowed {
            return Err(ApplicationError::PermissionDenied(
                "location access is not allowed".to_string(),
            ));
        }

        let position = self.position.ok_or_else(|| {
            ApplicationError::Unavailable("no device position configured".to_string())
        })?;
        debug!(%position, "Reporting configured position");
        Ok(position)
    }
}
