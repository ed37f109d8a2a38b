//! Session wiring
//!
//! Builds a ready-to-use `MapSession` from configuration, with the Nominatim
//! adapter as geocoder and the configured device position as geolocation
//! source. The map surface and the notifier belong to the presentation
//! shell and are passed in.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{MapSurfacePort, NotificationPort};
use application::services::MapSession;
use tracing::info;

use crate::adapters::{FixedGeolocation, NominatimGeocodingAdapter};
use crate::config::AppConfig;

/// Build a map session from configuration
///
/// # Errors
///
/// Returns `Configuration` when any configuration section is invalid.
pub fn build_map_session(
    config: &AppConfig,
    surface: Arc<dyn MapSurfacePort>,
    notifier: Arc<dyn NotificationPort>,
) -> Result<MapSession, ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let geocoder = NominatimGeocodingAdapter::new(&config.geocoding)
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
    let geolocation = FixedGeolocation::from_config(&config.geolocation)
        .map_err(ApplicationError::Configuration)?;

    let session = MapSession::new(Arc::new(geocoder), surface, notifier, config.session())?
        .with_geolocation(Arc::new(geolocation));

    info!(
        geocoder = %config.geocoding.base_url,
        debounce_ms = config.suggestions.debounce_ms,
        "Map session ready"
    );
    Ok(session)
}
