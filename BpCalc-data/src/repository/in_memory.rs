use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::models::reading::{NewReadingRecord, ReadingRecord};
use super::errors::RepositoryError;
use super::reading::ReadingRepositoryTrait;

/// In-memory storage for blood pressure readings, keyed by UUID v4 strings.
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct InMemoryReadingRepository {
    readings: Arc<RwLock<HashMap<String, ReadingRecord>>>,
}

impl Default for InMemoryReadingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReadingRepository {
    /// Create a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            readings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Ids handed out by this store are hyphenated lowercase UUIDs; anything
    /// that does not parse cannot be held here.
    fn normalize_id(id: &str) -> Option<String> {
        Uuid::parse_str(id).ok().map(|uuid| uuid.to_string())
    }
}

#[async_trait]
impl ReadingRepositoryTrait for InMemoryReadingRepository {
    async fn insert(&self, reading: NewReadingRecord) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let mut store = self.readings.write()?;

        if store.contains_key(&id) {
            return Err(RepositoryError::WriteConflict(format!("id {} already in use", id)));
        }

        debug!("Storing reading in memory: id={}", id);
        store.insert(id.clone(), reading.with_id(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<ReadingRecord, RepositoryError> {
        let key = Self::normalize_id(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        let store = self.readings.read()?;

        store
            .get(&key)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn all(&self) -> Result<Vec<ReadingRecord>, RepositoryError> {
        let store = self.readings.read()?;
        let mut readings: Vec<ReadingRecord> = store.values().cloned().collect();

        // HashMap order is random; keep listings stable between calls
        readings.sort_by(|a, b| a.reading_time.cmp(&b.reading_time).then_with(|| a.id.cmp(&b.id)));
        Ok(readings)
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        let Some(key) = Self::normalize_id(id) else {
            return Ok(0);
        };

        let mut store = self.readings.write()?;
        Ok(store.remove(&key).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let _store = self.readings.read()?;
        Ok(())
    }
}
