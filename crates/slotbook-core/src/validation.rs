//! Input validation helpers shared by the service layer.
//!
//! Each helper returns a typed [`ValidationError`] naming the offending
//! field, so callers can surface precise messages without string
//! matching.

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_NAME_LEN;

/// Validates an entity display name: non-empty after trimming and within
/// the catalog-wide length limit.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a price expressed in cents; negative prices are always a
/// data entry error (free things are priced at 0, not -1).
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Requires a string field to be present and non-blank.
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value)
}
