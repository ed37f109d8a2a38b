//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A value violated a domain invariant, e.g. a service returned an
    /// out-of-range position
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Transport failure reaching an external service
    #[error("Network error: {0}")]
    Network(String),

    /// External service answered with a failure
    #[error("Service error: {0}")]
    Service(String),

    /// The user denied access to device geolocation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Device geolocation is not available
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Service(_))
    }

    /// Short, non-technical text suitable for a user-visible notice
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the location service. Check your connection.".to_string(),
            Self::Service(_) => "The location service could not handle the request. Try again later.".to_string(),
            Self::PermissionDenied(_) => "Location access was denied.".to_string(),
            Self::Unavailable(_) => "Your current location is not available.".to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Domain(_) => "The location service returned an invalid position.".to_string(),
            Self::Configuration(_) => "Something went wrong.".to_string(),
        }
    }
}
