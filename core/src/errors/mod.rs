//! Domain-specific error types and error handling.

mod types;

pub use types::ValidationError;

use thiserror::Error;

use crate::domain::entities::Purpose;

/// Core domain errors
///
/// A verification that simply does not match is not an error; see
/// `VerifyOutcome`. These variants cover rejected input, the delivery gate
/// and collaborator failures.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Delivery disabled for purpose: {purpose}")]
    DeliveryDisabled { purpose: Purpose },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Notifier error: {message}")]
    Notifier { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable machine-readable identifier
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(err) => err.error_code(),
            DomainError::DeliveryDisabled { .. } => "DELIVERY_DISABLED",
            DomainError::Store { .. } => "STORE_FAILURE",
            DomainError::Cache { .. } => "CACHE_FAILURE",
            DomainError::Notifier { .. } => "NOTIFIER_FAILURE",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether the error comes from infrastructure rather than the caller
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Store { .. }
                | DomainError::Cache { .. }
                | DomainError::Notifier { .. }
                | DomainError::Internal { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
