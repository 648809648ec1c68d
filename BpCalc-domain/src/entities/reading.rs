use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Domain model for a stored blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Store-assigned identifier
    pub id: String,

    /// Patient name
    pub patient_name: String,

    /// Patient email
    pub patient_email: String,

    /// Systolic pressure in mmHg
    pub systolic: i32,

    /// Diastolic pressure in mmHg
    pub diastolic: i32,

    /// Category computed when the reading was submitted
    pub category: Category,

    /// When the reading was submitted
    pub recorded_at: DateTime<Utc>,
}

/// An inbound reading whose pressures have been parsed but not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReading {
    pub patient_name: String,
    pub patient_email: String,
    pub systolic: i32,
    pub diastolic: i32,
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Identifier assigned by the store
    pub id: String,

    /// Category the reading was stored with
    pub category: Category,
}

/// Clinical blood pressure category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Category {
    /// systolic < 90 and diastolic < 60
    Low,

    /// systolic < 120 and diastolic < 80
    Ideal,

    /// systolic < 140 and diastolic < 90
    #[serde(rename = "Pre High")]
    PreHigh,

    /// systolic <= 190 and diastolic <= 100
    High,

    /// Outside every rule above. Never persisted.
    Unclassifiable,
}

impl Category {
    /// Label used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Ideal => "Ideal",
            Category::PreHigh => "Pre High",
            Category::High => "High",
            Category::Unclassifiable => "Unclassifiable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Category::Low),
            "Ideal" => Ok(Category::Ideal),
            "Pre High" => Ok(Category::PreHigh),
            "High" => Ok(Category::High),
            "Unclassifiable" => Ok(Category::Unclassifiable),
            other => Err(format!("Unknown blood pressure category: {}", other)),
        }
    }
}

/// Client-caused refusal to accept a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("systolic out of range")]
    SystolicOutOfRange,

    #[error("diastolic out of range")]
    DiastolicOutOfRange,

    #[error("diastolic exceeds systolic")]
    DiastolicExceedsSystolic,

    #[error("unclassifiable reading")]
    Unclassifiable,
}

impl Rejection {
    /// Human-readable reason reported to the client
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in [
            Category::Low,
            Category::Ideal,
            Category::PreHigh,
            Category::High,
            Category::Unclassifiable,
        ] {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(Rejection::SystolicOutOfRange.to_string(), "systolic out of range");
        assert_eq!(Rejection::DiastolicOutOfRange.to_string(), "diastolic out of range");
        assert_eq!(Rejection::DiastolicExceedsSystolic.to_string(), "diastolic exceeds systolic");
        assert_eq!(Rejection::Unclassifiable.to_string(), "unclassifiable reading");
    }

    #[test]
    fn test_rejection_is_an_error() {
        let err: Box<dyn std::error::Error> = Box::new(Rejection::DiastolicExceedsSystolic);
        assert_eq!(err.to_string(), Rejection::DiastolicExceedsSystolic.reason());
    }
}
