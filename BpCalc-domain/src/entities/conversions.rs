use chrono::{DateTime, Utc};
use bp_calc_data::models::reading::{NewReadingRecord, ReadingRecord};

use crate::entities::reading::{Category, NewReading, Reading};

// Conversion functions between domain entities and data models.
// These follow the pattern convert_to_[target_layer]_[model_name].

/// Convert from data model to domain entity for a stored reading.
/// Fails when the stored category label is unknown.
pub fn convert_to_domain_reading(record: ReadingRecord) -> Result<Reading, String> {
    let category = record.category.parse::<Category>()?;

    Ok(Reading {
        id: record.id,
        patient_name: record.name,
        patient_email: record.email,
        systolic: record.systolic,
        diastolic: record.diastolic,
        category,
        recorded_at: record.reading_time,
    })
}

/// Convert a classified domain reading into the record handed to storage
pub fn convert_to_data_new_record(
    reading: &NewReading,
    category: Category,
    recorded_at: DateTime<Utc>,
) -> NewReadingRecord {
    NewReadingRecord {
        name: reading.patient_name.clone(),
        email: reading.patient_email.clone(),
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        category: category.to_string(),
        reading_time: recorded_at,
    }
}
