//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
}
