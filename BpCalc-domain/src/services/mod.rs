pub mod validator;
pub mod classifier;
pub mod reading;

// Domain services
// Validation and classification are pure; the reading service adds storage.

pub use classifier::classify_reading;
pub use validator::{validate_reading, DIASTOLIC_RANGE, SYSTOLIC_RANGE};
pub use reading::{create_reading_service, ReadingService, ReadingServiceError, ReadingServiceTrait};
