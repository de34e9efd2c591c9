//! Handler for POST /api/v1/auth/reset-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{ResetPasswordRequest, ResetPasswordResponse};
use crate::handlers::error::{domain_error_response, validation_failure_response};
use crate::state::AppState;

use ro_core::domain::value_objects::identifier::Identifier;
use ro_core::repositories::AccountRepository;
use ro_core::services::gateway::{MailGateway, SmsGateway};

/// Complete credential recovery: verify the submitted code and set the new
/// password. A code is consumed on first acceptance and can never be used
/// twice.
///
/// # Responses
///
/// * `200 OK` - password replaced
/// * `400 Bad Request` - invalid/expired code, no active request, mismatch
/// * `404 Not Found` - no matching account
pub async fn reset_password<R, S, M>(
    state: web::Data<AppState<R, S, M>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    S: SmsGateway + 'static,
    M: MailGateway + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure_response(&errors);
    }

    let identifier = match Identifier::parse(&request.identifier) {
        Ok(identifier) => identifier,
        Err(error) => return domain_error_response(&error.into()),
    };

    tracing::info!(
        identifier = %identifier.masked(),
        "Processing reset-password request"
    );

    match state
        .recovery_service
        .complete_recovery(
            &identifier,
            &request.code,
            &request.new_password,
            Some(&request.confirm_password),
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ResetPasswordResponse {
            message: "Password reset successfully.".to_string(),
        }),
        Err(error) => domain_error_response(&error),
    }
}
