use std::ops::RangeInclusive;

use crate::entities::reading::Rejection;

/// Accepted systolic pressures in mmHg
pub const SYSTOLIC_RANGE: RangeInclusive<i32> = 70..=190;

/// Accepted diastolic pressures in mmHg
pub const DIASTOLIC_RANGE: RangeInclusive<i32> = 40..=100;

/// Check a reading for physiological plausibility.
///
/// Rules are applied in order and the first failure is reported:
/// systolic range, diastolic range, then diastolic not above systolic.
pub fn validate_reading(systolic: i32, diastolic: i32) -> Result<(), Rejection> {
    if !SYSTOLIC_RANGE.contains(&systolic) {
        return Err(Rejection::SystolicOutOfRange);
    }

    if !DIASTOLIC_RANGE.contains(&diastolic) {
        return Err(Rejection::DiastolicOutOfRange);
    }

    if diastolic > systolic {
        return Err(Rejection::DiastolicExceedsSystolic);
    }

    Ok(())
}
