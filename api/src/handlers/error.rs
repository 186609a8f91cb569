//! Mapping of domain and request errors onto HTTP responses

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use om_core::errors::DomainError;
use om_shared::OtpResponse;

/// Text returned when delivery is disabled for a purpose
pub const DELIVERY_DISABLED_MESSAGE: &str = "OTP not sent, please contact the administrator";

/// Text returned for infrastructure failures; details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, please try again later";

/// Envelope field that carries failure text
///
/// Issue failures use `message`; verify failures use `reason`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureField {
    Message,
    Reason,
}

impl FailureField {
    pub fn body(self, text: impl Into<String>) -> OtpResponse {
        match self {
            FailureField::Message => OtpResponse::failed_with_message(text),
            FailureField::Reason => OtpResponse::failed_with_reason(text),
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// - validation errors become 400 with the validation text
/// - a disabled delivery gate becomes 403
/// - store, cache, notifier and internal failures become 500 with generic text
pub fn handle_domain_error(error: &DomainError, field: FailureField) -> HttpResponse {
    match error {
        DomainError::Validation(validation) => {
            tracing::debug!(error_code = error.error_code(), "Rejected request: {}", validation);
            HttpResponse::BadRequest().json(field.body(validation.to_string()))
        }
        DomainError::DeliveryDisabled { .. } => {
            HttpResponse::Forbidden().json(field.body(DELIVERY_DISABLED_MESSAGE))
        }
        _ => {
            tracing::error!(error_code = error.error_code(), error = %error, "Request failed");
            HttpResponse::InternalServerError().json(field.body(INTERNAL_ERROR_MESSAGE))
        }
    }
}

/// 400 response for a DTO that failed `validator` checks
pub fn handle_validation_errors(errors: &ValidationErrors, field: FailureField) -> HttpResponse {
    HttpResponse::BadRequest().json(field.body(describe_validation_errors(errors)))
}

/// First validation message, by field name, for a stable response text
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    fields
        .into_iter()
        .find_map(|(name, errors)| {
            errors.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid {}", name))
            })
        })
        .unwrap_or_else(|| "invalid request".to_string())
}

/// JSON extractor error handler producing the failed envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Malformed JSON body");

    let response = HttpResponse::BadRequest()
        .json(OtpResponse::failed_with_message(format!("Invalid request body: {}", err)));
    InternalError::from_response(err, response).into()
}
