//! Unit tests for domain error types

use crate::domain::entities::Purpose;
use crate::errors::{DomainError, ValidationError};

#[test]
fn test_validation_error_messages() {
    let error = ValidationError::RequiredField {
        field: "email".to_string(),
    };
    assert_eq!(error.to_string(), "Required field: email");

    let error = ValidationError::UnknownPurpose {
        value: "checkout".to_string(),
    };
    assert!(error.to_string().contains("checkout"));
}

#[test]
fn test_validation_converts_into_domain_error() {
    let error: DomainError = ValidationError::InvalidCodeFormat.into();

    assert!(matches!(
        error,
        DomainError::Validation(ValidationError::InvalidCodeFormat)
    ));
    assert_eq!(error.error_code(), "INVALID_CODE_FORMAT");
    assert!(!error.is_infrastructure());
}

#[test]
fn test_delivery_disabled_names_purpose() {
    let error = DomainError::DeliveryDisabled {
        purpose: Purpose::Signup,
    };

    assert_eq!(error.to_string(), "Delivery disabled for purpose: signup");
    assert_eq!(error.error_code(), "DELIVERY_DISABLED");
    assert!(!error.is_infrastructure());
}

#[test]
fn test_infrastructure_errors() {
    let errors = [
        DomainError::Store {
            message: "connection refused".to_string(),
        },
        DomainError::Notifier {
            message: "smtp timeout".to_string(),
        },
        DomainError::Internal {
            message: "boom".to_string(),
        },
    ];

    for error in errors {
        assert!(error.is_infrastructure(), "{} should be infrastructure", error);
    }
}
