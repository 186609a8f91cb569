//! Input validation errors
//!
//! Raised before any store or cache access; a request failing validation has
//! no side effects.

use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid code format")]
    InvalidCodeFormat,

    #[error("Unknown purpose: {value}")]
    UnknownPurpose { value: String },
}

impl ValidationError {
    /// Stable machine-readable identifier
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidCodeFormat => "INVALID_CODE_FORMAT",
            ValidationError::UnknownPurpose { .. } => "UNKNOWN_PURPOSE",
        }
    }
}
