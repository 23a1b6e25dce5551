//! Validation error types

use std::fmt;

/// Validation error for form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value could not be parsed (dates, ids)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required name field and enforce its character limit.
pub(crate) fn bounded_name(
    s: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    // Column limits are VARCHAR(n), which counts characters, not bytes
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(s.to_owned())
}
