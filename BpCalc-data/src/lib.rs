// BpCalc Data
// This crate handles persistence of blood pressure readings

// SQLite connection management
#[cfg(feature = "sqlite")]
pub mod database;

// Repository contract and its implementations
pub mod repository;

// Data storage models
pub mod models;
