//! Input validation for restaurant data and feedback.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Integer outside its allowed range.
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },
    /// Price is negative or not a finite number.
    InvalidPrice(f64),
    /// Time not in "HH:MM" or "HH:MM:SS" form.
    InvalidTime { field: String, value: String },
    /// Party-size bounds do not satisfy 1 <= min <= max.
    InvalidPartySize { min: i64, max: i64 },
    /// Feedback was already recorded for the log entry.
    FeedbackAlreadySubmitted(i64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{} must be between {} and {} (got {})",
                field, min, max, actual
            ),
            ValidationError::InvalidPrice(price) => {
                write!(f, "price must be a non-negative number (got {})", price)
            }
            ValidationError::InvalidTime { field, value } => {
                write!(f, "{} must be HH:MM or HH:MM:SS (got {:?})", field, value)
            }
            ValidationError::InvalidPartySize { min, max } => write!(
                f,
                "party size bounds must satisfy 1 <= min <= max (got {}..{})",
                min, max
            ),
            ValidationError::FeedbackAlreadySubmitted(id) => {
                write!(f, "feedback already submitted for log {}", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Lowest accepted feedback rating.
pub const MIN_RATING: i64 = 1;

/// Highest accepted feedback rating.
pub const MAX_RATING: i64 = 5;

/// Highest spice level.
pub const MAX_SPICE_LEVEL: i64 = 5;

fn check_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}

/// Validate a feedback rating (1 to 5).
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    check_range("rating", rating, MIN_RATING, MAX_RATING)
}

/// Validate a spice level (0 to 5).
pub fn validate_spice_level(level: i64) -> Result<(), ValidationError> {
    check_range("spice level", level, 0, MAX_SPICE_LEVEL)
}

/// Validate a day of week (0 = Monday to 6 = Sunday).
pub fn validate_day_of_week(day: i64) -> Result<(), ValidationError> {
    check_range("day of week", day, 0, 6)
}

/// Validate a menu item price.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

/// Validate that a required text field is not blank.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    Ok(())
}

/// Validate a wall-clock time string.
///
/// Accepts "HH:MM" and "HH:MM:SS" with two-digit, zero-padded components.
pub fn validate_time(field: &str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(invalid());
    }

    let limits = [23u32, 59, 59];
    for (part, limit) in parts.iter().zip(limits) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u32 = part.parse().map_err(|_| invalid())?;
        if number > limit {
            return Err(invalid());
        }
    }

    Ok(())
}

/// Validate reservation party-size bounds.
pub fn validate_party_size(min: i64, max: i64) -> Result<(), ValidationError> {
    if min < 1 || min > max {
        return Err(ValidationError::InvalidPartySize { min, max });
    }
    Ok(())
}
