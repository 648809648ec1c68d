use thiserror::Error;
use tracing::{debug, warn};
use chrono::Utc;
use async_trait::async_trait;

use bp_calc_data::repository::{ReadingRepositoryTrait, RepositoryError};
use crate::entities::conversions;
use crate::entities::reading::{Category, NewReading, Reading, Rejection, Submission};
use crate::services::classifier::classify_reading;
use crate::services::validator::validate_reading;

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// The reading was refused; nothing was stored
    #[error("{0}")]
    Rejected(Rejection),

    /// No reading has the requested id
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// The store failed to serve the request
    #[error("Storage failure: {0}")]
    Storage(RepositoryError),
}

impl From<Rejection> for ReadingServiceError {
    fn from(rejection: Rejection) -> Self {
        ReadingServiceError::Rejected(rejection)
    }
}

/// Operations the HTTP layer invokes on blood pressure readings
#[async_trait]
pub trait ReadingServiceTrait {
    /// Validate, classify and store a new reading
    async fn submit(&self, reading: NewReading) -> Result<Submission, ReadingServiceError>;

    /// Every stored reading
    async fn list(&self) -> Result<Vec<Reading>, ReadingServiceError>;

    /// A single reading by id
    async fn get(&self, id: &str) -> Result<Reading, ReadingServiceError>;

    /// Delete a reading, returning the number removed
    async fn remove(&self, id: &str) -> Result<u64, ReadingServiceError>;

    /// Check that storage is reachable
    async fn storage_status(&self) -> Result<(), ReadingServiceError>;
}

/// Reading service for domain logic. Holds nothing but its repository.
pub struct ReadingService<R: ReadingRepositoryTrait> {
    repository: R,
}

impl<R: ReadingRepositoryTrait> ReadingService<R> {
    /// Create a new reading service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors. Storage failures are logged by the caller.
    fn map_repo_error(&self, err: RepositoryError) -> ReadingServiceError {
        match err {
            RepositoryError::NotFound(id) => ReadingServiceError::NotFound(id),
            other => ReadingServiceError::Storage(other),
        }
    }

    fn to_domain(&self, record: bp_calc_data::models::ReadingRecord) -> Result<Reading, ReadingServiceError> {
        let id = record.id.clone();
        conversions::convert_to_domain_reading(record).map_err(|reason| {
            self.map_repo_error(RepositoryError::InvalidRecord(format!("reading {}: {}", id, reason)))
        })
    }
}

#[async_trait]
impl<R: ReadingRepositoryTrait> ReadingServiceTrait for ReadingService<R> {
    async fn submit(&self, reading: NewReading) -> Result<Submission, ReadingServiceError> {
        let recorded_at = Utc::now();

        if let Err(rejection) = validate_reading(reading.systolic, reading.diastolic) {
            warn!(
                systolic = reading.systolic,
                diastolic = reading.diastolic,
                "Reading rejected: {}",
                rejection
            );
            return Err(rejection.into());
        }

        let category = classify_reading(reading.systolic, reading.diastolic);
        if category == Category::Unclassifiable {
            warn!(
                systolic = reading.systolic,
                diastolic = reading.diastolic,
                "Reading rejected: {}",
                Rejection::Unclassifiable
            );
            return Err(Rejection::Unclassifiable.into());
        }

        let record = conversions::convert_to_data_new_record(&reading, category, recorded_at);
        let id = self.repository.insert(record)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        debug!("Reading stored: id={}, category={}", id, category);
        Ok(Submission { id, category })
    }

    async fn list(&self) -> Result<Vec<Reading>, ReadingServiceError> {
        let records = self.repository.all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        records.into_iter()
            .map(|record| self.to_domain(record))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Reading, ReadingServiceError> {
        let record = self.repository.find_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        self.to_domain(record)
    }

    async fn remove(&self, id: &str) -> Result<u64, ReadingServiceError> {
        self.repository.delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))
    }

    async fn storage_status(&self) -> Result<(), ReadingServiceError> {
        self.repository.ping()
            .await
            .map_err(|e| self.map_repo_error(e))
    }
}

/// Create a reading service over the given repository
pub fn create_reading_service<R>(repository: R) -> impl ReadingServiceTrait + Send + Sync
where
    R: ReadingRepositoryTrait + 'static,
{
    ReadingService::new(repository)
}
