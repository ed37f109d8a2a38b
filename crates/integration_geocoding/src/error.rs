//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success HTTP status
    #[error("Geocoding request failed: HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse the geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Coordinates could not be resolved to an address
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl GeocodingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout => true,
            Self::RequestFailed { status } => *status == 429 || *status >= 500,
            Self::ParseError(_) | Self::AddressNotFound(_) | Self::ConfigurationError(_) => false,
        }
    }

    /// Returns true if the service could not be reached at all
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout)
    }

    pub(crate) fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::ConnectionFailed(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(GeocodingError::Timeout.is_retryable());
        assert!(GeocodingError::RequestFailed { status: 503 }.is_retryable());
        assert!(GeocodingError::RequestFailed { status: 429 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::RequestFailed { status: 400 }.is_retryable());
        assert!(!GeocodingError::ParseError("test".to_string()).is_retryable());
        assert!(!GeocodingError::AddressNotFound("0,0".to_string()).is_retryable());
        assert!(!GeocodingError::ConfigurationError("test".to_string()).is_retryable());
    }

    #[test]
    fn test_transport_classification() {
        assert!(GeocodingError::Timeout.is_transport());
        assert!(GeocodingError::ConnectionFailed("refused".to_string()).is_transport());
        assert!(!GeocodingError::RequestFailed { status: 500 }.is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::RequestFailed { status: 502 };
        assert_eq!(err.to_string(), "Geocoding request failed: HTTP 502");

        let err = GeocodingError::AddressNotFound("19.076,72.8777".to_string());
        assert!(err.to_string().contains("19.076,72.8777"));

        assert!(GeocodingError::Timeout.to_string().contains("timed out"));
    }
}
