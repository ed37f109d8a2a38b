//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod geolocation_adapter;
mod notification_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use geolocation_adapter::{FixedGeolocation, GeolocationConfig};
pub use notification_adapter::{ChannelNotifier, LogNotifier};
