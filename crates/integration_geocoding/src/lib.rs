//! Geocoding integration for Waypoint
//!
//! Provides free-text place search and reverse geocoding via the
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org) API.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`GeocodingClient`] defines the interface for forward and reverse lookups,
//! implemented by [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//!
//! let places = client.search("Mumbai").await?;
//! let here = client.reverse_geocode(19.076, 72.8777).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, NominatimGeocodingClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
pub use models::Place;
