//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::DomainError;
use domain::entities::SuggestionEntry;
use domain::value_objects::GeoLocation;
use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, Place,
};
use tracing::{debug, instrument, warn};

/// Adapter for place search and reverse geocoding via Nominatim
#[derive(Debug)]
pub struct NominatimGeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl NominatimGeocodingAdapter {
    /// Create an adapter with a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        Ok(Self::from_client(NominatimGeocodingClient::new(config)?))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Map integration errors into the two failure kinds callers see
    fn map_error(error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            e if e.is_transport() => ApplicationError::Network(e.to_string()),
            e => ApplicationError::Service(e.to_string()),
        }
    }

    fn to_entry(place: Place) -> Result<SuggestionEntry, ApplicationError> {
        let location = GeoLocation::new(place.latitude, place.longitude)
            .map_err(|e| ApplicationError::Domain(DomainError::from(e)))?;
        Ok(SuggestionEntry::new(place.place_id, place.display_name, location))
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError> {
        let places = self.client.search(text).await.map_err(Self::map_error)?;

        let entries: Vec<SuggestionEntry> = places
            .into_iter()
            .filter_map(|place| match Self::to_entry(place) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping place with invalid coordinates");
                    None
                },
            })
            .collect();

        debug!(count = entries.len(), "Geocoding search mapped");
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<SuggestionEntry, ApplicationError> {
        let place = self
            .client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        Self::to_entry(place)
    }
}
