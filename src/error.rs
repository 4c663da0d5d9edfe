//! Service-layer error taxonomy.

use thiserror::Error;
use validator::ValidationErrors;

use crate::model::PuzzleIntegrityError;
use crate::store::storage::StorageError;

/// Errors that can occur in service layer operations.
///
/// Payload-shaped problems never surface here: an invalid or stale cached
/// payload is handled as "treat as absent" by the reconciler, so the user
/// sees a fresh grid rather than an error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Remote storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {err}"))
    }
}

impl From<PuzzleIntegrityError> for ServiceError {
    fn from(err: PuzzleIntegrityError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}
