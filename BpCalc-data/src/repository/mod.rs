// Repository module structure
pub mod errors;
mod reading;
mod in_memory;
#[cfg(feature = "sqlite")]
mod sqlite;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use reading::ReadingRepositoryTrait;
pub use in_memory::InMemoryReadingRepository;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReadingRepository;

#[cfg(feature = "mock")]
pub use reading::MockReadingRepositoryTrait;
