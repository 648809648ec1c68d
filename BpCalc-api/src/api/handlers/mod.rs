pub mod health;
pub mod readings;

// Re-export handlers for easier imports
pub use health::health_check;
pub use readings::{create_reading, delete_reading, get_reading, list_readings, SharedReadingService};
