//! Nominatim geocoding client
//!
//! Resolves free-text queries to candidate places and coordinates to display
//! names using the [Nominatim](https://nominatim.openstreetmap.org) API.
//!
//! Implements request spacing (Nominatim usage policy) and an exact-query
//! result cache; neither changes the results a caller sees.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, Response};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;
use crate::models::{Place, RawPlace};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places matching a free-text query, in service ranking order
    ///
    /// An empty query yields an empty list without contacting the service.
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError>;

    /// Resolve coordinates to the nearest named place
    async fn reverse_geocode(&self, latitude: f64, longitude: f64)
    -> Result<Place, GeocodingError>;
}

/// Nominatim-based geocoding client with request spacing and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<Place>>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &NominatimConfig {
        &self.config
    }

    /// Keep requests at least `min_request_interval_ms` apart
    async fn rate_limit(&self) {
        if self.config.min_request_interval_ms == 0 {
            return;
        }

        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Spacing geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Response, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, %endpoint, "Geocoding service returned an error status");
            return Err(GeocodingError::RequestFailed {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cache) = &self.cache {
            if let Some(places) = cache.get(query).await {
                debug!(%query, count = places.len(), "Geocoding cache hit");
                return Ok(places);
            }
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.max_results.to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Searching places");

        let raw: Vec<RawPlace> = self
            .get("search", &params)
            .await?
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places: Vec<Place> = raw
            .into_iter()
            .filter_map(|entry| match entry.into_place() {
                Ok(place) => Some(place),
                Err(e) => {
                    warn!(%query, error = %e, "Skipping malformed place");
                    None
                },
            })
            .collect();

        if let Some(cache) = &self.cache {
            cache.insert(query.to_string(), places.clone()).await;
        }
        debug!(%query, count = places.len(), "Search completed");

        Ok(places)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Place, GeocodingError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "jsonv2".to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        debug!(%latitude, %longitude, "Reverse geocoding");

        let raw: RawPlace = self
            .get("reverse", &params)
            .await?
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if raw.error.is_some() || raw.display_name.is_none() {
            return Err(GeocodingError::AddressNotFound(format!(
                "{latitude},{longitude}"
            )));
        }

        raw.into_place()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = NominatimConfig {
            base_url: String::new(),
            ..NominatimConfig::for_testing()
        };
        let err = NominatimGeocodingClient::new(&config).unwrap_err();
        assert!(matches!(err, GeocodingError::ConfigurationError(_)));
    }

    #[test]
    fn test_cache_follows_config() {
        let client = NominatimGeocodingClient::new(&NominatimConfig::for_testing()).unwrap();
        assert!(client.cache.is_none());

        let client = NominatimGeocodingClient::new(&NominatimConfig::default()).unwrap();
        assert!(client.cache.is_some());
    }

    #[tokio::test]
    async fn test_empty_query_skips_request() {
        let config = NominatimConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..NominatimConfig::for_testing()
        };
        let client = NominatimGeocodingClient::new(&config).unwrap();
        assert!(client.search("   ").await.unwrap().is_empty());
    }
}
