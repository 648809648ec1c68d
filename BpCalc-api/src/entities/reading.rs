use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use bp_calc_domain::entities::{NewReading, Reading};

/// A pressure value as it may appear on the wire.
///
/// Clients send either a JSON number or a numeric string; anything that is
/// not a whole number fitting in `i32` is refused before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PressureValue {
    Integer(i64),
    /// Only reached for integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// Why a pressure value could not be read
#[derive(Debug, Error, PartialEq)]
pub enum PressureParseError {
    #[error("{field} must be a whole number")]
    NotInteger { field: &'static str },

    #[error("{field} is out of the representable range")]
    Overflow { field: &'static str },
}

impl PressureValue {
    /// Interpret the value as mmHg
    pub fn to_mmhg(&self, field: &'static str) -> Result<i32, PressureParseError> {
        match self {
            PressureValue::Integer(n) => {
                i32::try_from(*n).map_err(|_| PressureParseError::Overflow { field })
            }
            PressureValue::Unsigned(_) => Err(PressureParseError::Overflow { field }),
            // Integers too large for u64 arrive as floats
            PressureValue::Float(x) if x.fract() == 0.0 && (*x < i32::MIN as f64 || *x > i32::MAX as f64) => {
                Err(PressureParseError::Overflow { field })
            }
            PressureValue::Float(_) => Err(PressureParseError::NotInteger { field }),
            PressureValue::Text(raw) => {
                let trimmed = raw.trim();
                match trimmed.parse::<i64>() {
                    Ok(n) => i32::try_from(n).map_err(|_| PressureParseError::Overflow { field }),
                    Err(_) => Err(PressureParseError::NotInteger { field }),
                }
            }
        }
    }
}

/// Request payload for submitting a blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReadingRequest {
    /// Patient name
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    /// Patient email
    #[validate(length(min = 1, message = "email must not be empty"))]
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Systolic pressure in mmHg (the higher number)
    #[schema(value_type = i32, example = 130)]
    pub systolic: PressureValue,

    /// Diastolic pressure in mmHg (the lower number)
    #[schema(value_type = i32, example = 89)]
    pub diastolic: PressureValue,
}

impl CreateReadingRequest {
    /// Convert into the domain input, parsing both pressures
    pub fn into_new_reading(self) -> Result<NewReading, PressureParseError> {
        let systolic = self.systolic.to_mmhg("systolic")?;
        let diastolic = self.diastolic.to_mmhg("diastolic")?;

        Ok(NewReading {
            patient_name: self.name,
            patient_email: self.email,
            systolic,
            diastolic,
        })
    }
}

/// Public representation of a stored reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadingResponse {
    /// Store-assigned identifier
    pub id: String,

    pub name: String,

    pub email: String,

    pub systolic: i32,

    pub diastolic: i32,

    /// Category computed when the reading was submitted
    #[schema(example = "Pre High")]
    pub category: String,

    /// Submission time (RFC 3339)
    #[serde(rename = "readingtime")]
    pub reading_time: DateTime<Utc>,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            name: reading.patient_name,
            email: reading.patient_email,
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            category: reading.category.to_string(),
            reading_time: reading.recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_calc_domain::entities::Category;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> CreateReadingRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_integer_and_string_pressures() {
        let request = parse(json!({
            "name": "A",
            "email": "a@x.com",
            "systolic": 130,
            "diastolic": " 89 "
        }));

        let reading = request.into_new_reading().unwrap();
        assert_eq!(reading.systolic, 130);
        assert_eq!(reading.diastolic, 89);
        assert_eq!(reading.patient_name, "A");
    }

    #[test]
    fn test_float_pressure_refused() {
        let request = parse(json!({
            "name": "A",
            "email": "a@x.com",
            "systolic": 120.5,
            "diastolic": 80
        }));

        assert_eq!(
            request.into_new_reading().unwrap_err(),
            PressureParseError::NotInteger { field: "systolic" }
        );
    }

    #[test]
    fn test_non_numeric_text_refused() {
        let request = parse(json!({
            "name": "A",
            "email": "a@x.com",
            "systolic": 120,
            "diastolic": "eighty"
        }));

        let err = request.into_new_reading().unwrap_err();
        assert_eq!(err.to_string(), "diastolic must be a whole number");
    }

    #[test]
    fn test_out_of_i32_range_refused() {
        let request = parse(json!({
            "name": "A",
            "email": "a@x.com",
            "systolic": 4_000_000_000i64,
            "diastolic": 80
        }));

        assert_eq!(
            request.into_new_reading().unwrap_err(),
            PressureParseError::Overflow { field: "systolic" }
        );
    }

    #[test]
    fn test_integers_beyond_i64_refused_as_overflow() {
        let request: CreateReadingRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@x.com","systolic":10000000000000000000,"diastolic":80}"#,
        )
        .unwrap();
        assert_eq!(request.systolic, PressureValue::Unsigned(10_000_000_000_000_000_000));
        assert_eq!(
            request.into_new_reading().unwrap_err(),
            PressureParseError::Overflow { field: "systolic" }
        );

        let request: CreateReadingRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@x.com","systolic":120,"diastolic":100000000000000000000000}"#,
        )
        .unwrap();
        assert_eq!(
            request.into_new_reading().unwrap_err(),
            PressureParseError::Overflow { field: "diastolic" }
        );
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let request = parse(json!({
            "name": "",
            "email": "a@x.com",
            "systolic": 120,
            "diastolic": 80
        }));

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_wire_shape() {
        let reading = Reading {
            id: "7".to_string(),
            patient_name: "A".to_string(),
            patient_email: "a@x.com".to_string(),
            systolic: 130,
            diastolic: 89,
            category: Category::PreHigh,
            recorded_at: "2024-03-01T10:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(ReadingResponse::from(reading)).unwrap();

        assert_eq!(value["category"], "Pre High");
        assert_eq!(value["readingtime"], "2024-03-01T10:00:00Z");
        assert!(value.get("reading_time").is_none());
    }
}
