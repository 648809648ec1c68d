use async_trait::async_trait;

use crate::models::reading::{NewReadingRecord, ReadingRecord};
use super::errors::RepositoryError;

/// Persistence contract for blood pressure readings.
///
/// Identifiers are opaque strings whose encoding belongs to the
/// implementation. An id the store cannot parse is treated exactly like an
/// id it does not hold. Implementations must be safe for concurrent use.
/// Each call reports a backend failure once; retries are the caller's.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ReadingRepositoryTrait: Send + Sync {
    /// Insert a reading and return the id assigned to it
    async fn insert(&self, reading: NewReadingRecord) -> Result<String, RepositoryError>;

    /// Find a reading by id, failing with `NotFound` when absent
    async fn find_by_id(&self, id: &str) -> Result<ReadingRecord, RepositoryError>;

    /// Every stored reading, in an order chosen by the store
    async fn all(&self) -> Result<Vec<ReadingRecord>, RepositoryError>;

    /// Delete a reading, returning how many were removed (0 or 1)
    async fn delete(&self, id: &str) -> Result<u64, RepositoryError>;

    /// Check that the store can serve requests
    async fn ping(&self) -> Result<(), RepositoryError>;
}
