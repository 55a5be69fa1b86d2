//! Validation error types

use std::fmt;

/// Validation error for inbound values and query settings
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field could not be parsed as a decimal number
    NotANumber { field: &'static str, value: String },

    /// Parsed number is NaN or infinite
    NotFinite { field: &'static str },

    /// Number must be strictly greater than zero
    NotPositive { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., SQL identifier)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::NotANumber { field, value } => {
                write!(f, "{} must be a decimal number, got '{}'", field, value)
            }
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
            Self::NotPositive { field } => write!(f, "{} must be greater than zero", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NotANumber {
            field: "centerLat",
            value: "north".into(),
        };
        assert_eq!(
            err.to_string(),
            "centerLat must be a decimal number, got 'north'"
        );
    }
}
