use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::reading::{NewReadingRecord, ReadingRecord};
use super::errors::RepositoryError;
use super::reading::ReadingRepositoryTrait;

/// SQLite-backed repository. Ids are the table's integer rowids rendered as
/// decimal strings.
#[derive(Clone)]
pub struct SqliteReadingRepository {
    pool: DatabasePool,
}

impl SqliteReadingRepository {
    /// Create a repository over an already migrated pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Run a blocking database operation off the async executor
    async fn with_connection<T, F>(&self, operation: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            operation(&*conn)
        })
        .await?
    }

    fn parse_id(id: &str) -> Option<i64> {
        id.trim().parse::<i64>().ok()
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<ReadingRecord> {
        let id: i64 = row.get(0)?;
        let reading_time: String = row.get(6)?;
        let reading_time = DateTime::parse_from_rfc3339(&reading_time)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e)))?
            .with_timezone(&Utc);

        Ok(ReadingRecord {
            id: id.to_string(),
            name: row.get(1)?,
            email: row.get(2)?,
            systolic: row.get(3)?,
            diastolic: row.get(4)?,
            category: row.get(5)?,
            reading_time,
        })
    }
}

/// Decode failures on stored rows are not backend outages
fn map_read_error(error: rusqlite::Error) -> RepositoryError {
    match error {
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepositoryError::InvalidRecord(error.to_string())
        }
        other => other.into(),
    }
}

#[async_trait]
impl ReadingRepositoryTrait for SqliteReadingRepository {
    async fn insert(&self, reading: NewReadingRecord) -> Result<String, RepositoryError> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO bp_readings (name, email, systolic, diastolic, category, readingtime)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    reading.name,
                    reading.email,
                    reading.systolic,
                    reading.diastolic,
                    reading.category,
                    reading.reading_time.to_rfc3339(),
                ],
            )?;

            let id = conn.last_insert_rowid().to_string();
            debug!("Stored reading in SQLite: id={}", id);
            Ok(id)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<ReadingRecord, RepositoryError> {
        let Some(rowid) = Self::parse_id(id) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let requested = id.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT id, name, email, systolic, diastolic, category, readingtime
                 FROM bp_readings WHERE id = ?1",
                [rowid],
                Self::map_row,
            )
            .optional()
            .map_err(map_read_error)?
            .ok_or(RepositoryError::NotFound(requested))
        })
        .await
    }

    async fn all(&self) -> Result<Vec<ReadingRecord>, RepositoryError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, systolic, diastolic, category, readingtime
                 FROM bp_readings ORDER BY id",
            )?;

            let rows = stmt.query_map([], Self::map_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_read_error)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        let Some(rowid) = Self::parse_id(id) else {
            return Ok(0);
        };

        self.with_connection(move |conn| {
            let deleted = conn.execute("DELETE FROM bp_readings WHERE id = ?1", [rowid])?;
            Ok(deleted as u64)
        })
        .await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}
