//! Input validation helpers
//!
//! Centralized limits and validation functions for API payloads.
//! Validation runs before any mutation; a rejected payload never
//! partially applies.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: worker, area, user display names
pub const MAX_NAME_LEN: usize = 200;

/// Rejection notes and free-text reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: badge ids, nationality tags, area ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Numeric limits ──────────────────────────────────────────────────

/// A single day-count field can never exceed the longest month
pub const MAX_DAY_COUNT: f64 = 31.0;

/// Daily pay rate sanity ceiling
pub const MAX_DAILY_RATE: f64 = 10_000.0;

/// Accepted year window for attendance periods
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a single day-count field.
///
/// Negative values are accepted here; the calculation engine coerces them
/// to zero. Values above the longest month are data-entry mistakes and are
/// rejected before any mutation.
pub fn validate_day_count(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value > MAX_DAY_COUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} out of range: {value} (max {MAX_DAY_COUNT})"),
        ));
    }
    Ok(())
}

/// Validate the four day-count fields of a payload.
pub fn validate_day_counts(days: &shared::models::DayCounts) -> Result<(), AppError> {
    validate_day_count(days.normal_days, "normal_days")?;
    validate_day_count(days.overtime_normal_days, "overtime_normal_days")?;
    validate_day_count(days.overtime_holiday_days, "overtime_holiday_days")?;
    validate_day_count(days.overtime_eid_days, "overtime_eid_days")?;
    Ok(())
}

/// Validate a month/year attendance period.
pub fn validate_period(month: u32, year: i32) -> Result<(), AppError> {
    if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::with_message(
            ErrorCode::PeriodInvalid,
            format!("invalid period {month}/{year}"),
        ));
    }
    Ok(())
}

/// Validate a daily pay rate.
pub fn validate_daily_rate(rate: f64) -> Result<(), AppError> {
    if !rate.is_finite() || rate < 0.0 || rate > MAX_DAILY_RATE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("daily_rate out of range: {rate}"),
        ));
    }
    Ok(())
}
