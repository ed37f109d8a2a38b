//! Geocoding service port
//!
//! Request/response contract to the external place search service. No state,
//! no retry policy; callers decide whether to retry.

use async_trait::async_trait;
use domain::entities::SuggestionEntry;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forward and reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search places matching free text, in service ranking order
    ///
    /// Empty text and "no matches" both yield an empty list.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Service` on a failed response.
    async fn search(&self, text: &str) -> Result<Vec<SuggestionEntry>, ApplicationError>;

    /// Resolve a device position into a named place
    ///
    /// # Errors
    ///
    /// Same failure kinds as [`GeocodingPort::search`].
    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<SuggestionEntry, ApplicationError>;
}
