use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Storage model for a persisted blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRecord {
    /// Store-assigned identifier, opaque to every layer above the repository
    pub id: String,

    /// Patient name as submitted
    pub name: String,

    /// Patient email as submitted
    pub email: String,

    /// Systolic pressure in mmHg
    pub systolic: i32,

    /// Diastolic pressure in mmHg
    pub diastolic: i32,

    /// Category label computed at insertion time
    pub category: String,

    /// When the reading was submitted
    #[serde(rename = "readingtime")]
    pub reading_time: DateTime<Utc>,
}

/// A reading ready to be inserted. Category and time are already set;
/// the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReadingRecord {
    pub name: String,
    pub email: String,
    pub systolic: i32,
    pub diastolic: i32,
    pub category: String,
    #[serde(rename = "readingtime")]
    pub reading_time: DateTime<Utc>,
}

impl NewReadingRecord {
    /// Attach the identifier the store assigned
    pub fn with_id(self, id: String) -> ReadingRecord {
        ReadingRecord {
            id,
            name: self.name,
            email: self.email,
            systolic: self.systolic,
            diastolic: self.diastolic,
            category: self.category,
            reading_time: self.reading_time,
        }
    }
}
