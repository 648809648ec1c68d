// Testing utilities for crates built on the domain layer
// Only compiled with the "mock" feature

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bp_calc_data::models::{NewReadingRecord, ReadingRecord};
use bp_calc_data::repository::{InMemoryReadingRepository, ReadingRepositoryTrait, RepositoryError};

/// In-memory repository whose failures can be switched on from a test
#[derive(Default)]
pub struct StubReadingRepository {
    inner: InMemoryReadingRepository,
    fail_writes: AtomicBool,
    unavailable: AtomicBool,
}

impl StubReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert fail with a write conflict
    pub fn with_write_failure(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Make every operation fail as if the store were unreachable
    pub fn with_storage_down(self) -> Self {
        self.unavailable.store(true, Ordering::SeqCst);
        self
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RepositoryError::StorageUnavailable("stub storage is down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for StubReadingRepository {
    async fn insert(&self, record: NewReadingRecord) -> Result<String, RepositoryError> {
        self.check_available()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::WriteConflict("stub rejected the write".to_string()));
        }
        self.inner.insert(record).await
    }

    async fn find_by_id(&self, id: &str) -> Result<ReadingRecord, RepositoryError> {
        self.check_available()?;
        self.inner.find_by_id(id).await
    }

    async fn all(&self) -> Result<Vec<ReadingRecord>, RepositoryError> {
        self.check_available()?;
        self.inner.all().await
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        self.check_available()?;
        self.inner.delete(id).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
