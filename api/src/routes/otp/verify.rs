use actix_web::{web, HttpResponse};
use validator::Validate;

use om_core::domain::entities::Purpose;
use om_core::errors::DomainError;
use om_core::repositories::OtpRepository;
use om_core::services::{NotifierTrait, OtpCacheTrait, VerifyOutcome};
use om_shared::OtpResponse;

use crate::dto::VerifyOtpRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors, FailureField};

use super::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// Consumes the passcode if it matches an unconsumed, unexpired record for
/// the email and purpose.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "code": "042917",
///     "purpose": "signup"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "success" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `{ "status": "failed", "reason": "expired or not found" }`,
///   `"expired"`, or a validation reason
/// - 500 Internal Server Error: store failure
pub async fn verify_otp<R, C, N>(
    state: web::Data<AppState<R, C, N>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    C: OtpCacheTrait + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = ?errors, "Validation failed for verify request");
        return handle_validation_errors(&errors, FailureField::Reason);
    }

    let purpose = match request.purpose.parse::<Purpose>() {
        Ok(purpose) => purpose,
        Err(e) => return handle_domain_error(&DomainError::from(e), FailureField::Reason),
    };

    match state
        .otp_manager
        .verify(&request.email, &request.code, purpose)
        .await
    {
        Ok(VerifyOutcome::Verified) => HttpResponse::Ok().json(OtpResponse::success()),
        Ok(VerifyOutcome::Failed(failure)) => {
            HttpResponse::BadRequest().json(OtpResponse::failed_with_reason(failure.reason()))
        }
        Err(error) => handle_domain_error(&error, FailureField::Reason),
    }
}
