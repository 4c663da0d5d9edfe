//! Transport-agnostic remote storage errors.

use std::error::Error;
use thiserror::Error;

/// Result alias for remote storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by remote storage backends regardless of the underlying
/// transport.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or refused the request.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What the engine was doing when the backend failed.
        message: String,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
