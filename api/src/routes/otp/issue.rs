use actix_web::{web, HttpResponse};
use validator::Validate;

use om_core::domain::entities::Purpose;
use om_core::errors::DomainError;
use om_core::repositories::OtpRepository;
use om_core::services::{NotifierTrait, OtpCacheTrait};
use om_shared::validation::mask_email;
use om_shared::OtpResponse;

use crate::dto::IssueOtpRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors, FailureField};

use super::AppState;

/// Message returned once the passcode email has been dispatched
pub const ISSUE_SUCCESS_MESSAGE: &str = "OTP sent successfully";

/// Handler for POST /api/v1/otp/issue
///
/// Issues a passcode for the purpose and emails it to the address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "purpose": "signup"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "success", "message": "OTP sent successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing or invalid email, unknown purpose
/// - 403 Forbidden: delivery disabled for the purpose (the passcode is still stored)
/// - 500 Internal Server Error: store or email delivery failure
pub async fn issue_otp<R, C, N>(
    state: web::Data<AppState<R, C, N>>,
    request: web::Json<IssueOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + ?Sized + 'static,
    C: OtpCacheTrait + ?Sized + 'static,
    N: NotifierTrait + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = ?errors, "Validation failed for issue request");
        return handle_validation_errors(&errors, FailureField::Message);
    }

    let purpose = match request.purpose.parse::<Purpose>() {
        Ok(purpose) => purpose,
        Err(e) => return handle_domain_error(&DomainError::from(e), FailureField::Message),
    };

    match state.otp_manager.issue(&request.email, purpose).await {
        Ok(receipt) => {
            tracing::info!(
                email = %mask_email(&receipt.email),
                purpose = %receipt.purpose,
                message_id = %receipt.message_id,
                "Issue request completed"
            );
            HttpResponse::Ok().json(OtpResponse::success_with_message(ISSUE_SUCCESS_MESSAGE))
        }
        Err(error) => handle_domain_error(&error, FailureField::Message),
    }
}
