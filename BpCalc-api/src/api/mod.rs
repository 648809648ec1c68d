pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use bp_calc_data::database::{create_sqlite_pool, get_connection_info, DatabaseError};
use bp_calc_data::repository::{InMemoryReadingRepository, SqliteReadingRepository};
use bp_calc_domain::services::create_reading_service;

use crate::config::{AppConfig, StorageBackend};
use handlers::SharedReadingService;
use routes::AppState;

/// Build the reading service for the configured storage backend
pub fn build_reading_service(config: &AppConfig) -> Result<SharedReadingService, DatabaseError> {
    let service: SharedReadingService = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory reading storage");
            Arc::new(create_reading_service(InMemoryReadingRepository::new()))
        }
        StorageBackend::Sqlite => {
            let pool = create_sqlite_pool(&config.database)?;
            info!("Using SQLite reading storage: {}", get_connection_info(&pool)?);
            Arc::new(create_reading_service(SqliteReadingRepository::new(pool)))
        }
    };

    Ok(service)
}

/// Create the application router from configuration
pub fn create_application(config: &AppConfig) -> Result<Router, DatabaseError> {
    let service = build_reading_service(config)?;
    let state = AppState::new(service, config.environment.as_str());

    Ok(routes::create_app(state, config.request_timeout))
}
