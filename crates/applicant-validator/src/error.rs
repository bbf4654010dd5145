//! Validation Error Types

use thiserror::Error;

/// Errors raised while checking a submission against its declared domains
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::MissingField(field) => Some(field),
            ValidationError::InvalidFormat(_) => None,
        }
    }
}
