//! Device geolocation port

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for acquiring the device's current position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Acquire the current position
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when the user refused access, `Unavailable` when no
    /// position can be determined.
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeolocationPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeolocationPort>();
    }
}
