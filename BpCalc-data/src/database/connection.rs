//! SQLite connection management for the BpCalc service
//!
//! Pools are created from a [`DatabaseConfig`] and handed to the repository
//! that needs them; nothing here keeps a process-wide pool.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::info;

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Connection pool type used by the SQLite repository
pub type DatabasePool = r2d2::Pool<SqliteConnectionManager>;

/// Path value that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout and busy timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "data/bpcalc.db".to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to
    /// defaults for absent keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sqlite_path = lookup("DB_SQLITE_PATH")
            .filter(|path| !path.trim().is_empty())
            .unwrap_or(defaults.sqlite_path);

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| DatabaseError::ConfigError(format!("DB_MAX_CONNECTIONS must be a positive integer, got '{}'", raw)))?,
            None => defaults.max_connections,
        };

        let timeout_seconds = match lookup("DB_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| DatabaseError::ConfigError(format!("DB_TIMEOUT_SECONDS must be a positive integer, got '{}'", raw)))?,
            None => defaults.timeout_seconds,
        };

        info!(
            "Database configuration: path={}, max_connections={}, timeout={}s",
            sqlite_path, max_connections, timeout_seconds
        );

        Ok(Self {
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }

    /// Whether this configuration selects an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.sqlite_path == IN_MEMORY_PATH
    }
}

/// Create a migrated SQLite pool for the configured path
pub fn create_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    if config.is_in_memory() {
        return create_in_memory_sqlite_pool();
    }

    info!("Initializing SQLite database at: {}", config.sqlite_path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    let busy_timeout = Duration::from_secs(config.timeout_seconds);
    let manager = SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(move |conn| conn.busy_timeout(busy_timeout));

    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    let conn = pool.get()?;
    run_sqlite_migrations(&conn)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Create a single-connection in-memory SQLite pool.
///
/// Every `:memory:` connection is its own database, so the pool holds exactly
/// one connection and never recycles it.
pub fn create_in_memory_sqlite_pool() -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory().with_init(|conn| run_sqlite_migrations(conn));

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;

    info!("In-memory SQLite database initialized successfully");
    Ok(pool)
}

/// Describe the database behind a pool, for logs and health output
pub fn get_connection_info(pool: &DatabasePool) -> Result<String, DatabaseError> {
    let conn = pool.get()?;
    let path: String = conn.query_row("PRAGMA database_list", [], |row| row.get(2))?;

    let location = if path.is_empty() || path == IN_MEMORY_PATH {
        "SQLite in-memory database".to_string()
    } else {
        format!("SQLite database at {}", path)
    };

    let state = pool.state();
    Ok(format!(
        "{} (connections: active={}, idle={})",
        location, state.connections, state.idle_connections
    ))
}
