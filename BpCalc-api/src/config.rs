//! Runtime configuration for the BpCalc API server
//!
//! Everything is read from the process environment (after `.env` has been
//! loaded by the binary). Absent keys fall back to defaults; malformed values
//! abort startup with a [`ConfigError`].

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use bp_calc_data::database::{DatabaseConfig, DatabaseError};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Invalid database configuration: {0}")]
    Database(#[from] DatabaseError),
}

/// Where readings are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    Memory,
    /// SQLite file (or `:memory:`) through an r2d2 pool
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(format!("expected 'memory' or 'sqlite', got '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub storage: StorageBackend,
    pub database: DatabaseConfig,
    /// Upper bound on the time spent serving one request
    pub request_timeout: Duration,
    /// Deployment environment name reported by the health endpoint
    pub environment: String,
}

impl AppConfig {
    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "BPCALC_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let storage = parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Sqlite)?;
        let timeout_seconds = parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 10u64)?;
        if timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECONDS",
                message: "must be greater than zero".to_string(),
            });
        }

        let environment = lookup("APP_ENV")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "development".to_string());

        let database = DatabaseConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            storage,
            database,
            request_timeout: Duration::from_secs(timeout_seconds),
            environment,
        })
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key,
            message: format!("'{}' ({})", raw, e),
        }),
        _ => Ok(default),
    }
}
