use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No reading has the requested id, or the id is not a valid
    /// identifier for this store
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// The backing store could not serve the request
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The write was refused by the store (e.g. a uniqueness constraint)
    #[error("Write conflict: {0}")]
    WriteConflict(String),

    /// A stored row could not be decoded
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::StorageUnavailable(format!("lock poisoned: {}", error))
    }
}

impl From<tokio::task::JoinError> for RepositoryError {
    fn from(error: tokio::task::JoinError) -> Self {
        RepositoryError::StorageUnavailable(format!("storage task failed: {}", error))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for RepositoryError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(ref failure, _)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::WriteConflict(error.to_string())
            }
            other => RepositoryError::StorageUnavailable(other.to_string()),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for RepositoryError {
    fn from(error: r2d2::Error) -> Self {
        RepositoryError::StorageUnavailable(format!("connection pool: {}", error))
    }
}
