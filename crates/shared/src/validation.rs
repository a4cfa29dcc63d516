//! Common validation utilities for trip payloads.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validates that a trip date range is ordered (`start_date < end_date`).
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_range");
        err.message = Some("End date must be after start date".into());
        Err(err)
    }
}

/// Validates that a trip offers at least one open slot.
pub fn validate_open_slots(open_slots: i32) -> Result<(), ValidationError> {
    if open_slots >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("open_slots");
        err.message = Some("Open slots must be at least 1".into());
        Err(err)
    }
}

/// Validates that a budget range is ordered when both bounds are present.
pub fn validate_budget_range(
    budget_min: Option<f64>,
    budget_max: Option<f64>,
) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (budget_min, budget_max) {
        if min > max {
            let mut err = ValidationError::new("budget_range");
            err.message = Some("Minimum budget cannot exceed maximum budget".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Validates that budget bounds are non-negative.
pub fn validate_budget_value(value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("budget_value");
        err.message = Some("Budget must be non-negative".into());
        Err(err)
    }
}
