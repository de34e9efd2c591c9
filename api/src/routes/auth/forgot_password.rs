//! Handler for POST /api/v1/auth/forgot-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{ForgotPasswordRequest, ForgotPasswordResponse};
use crate::handlers::error::{domain_error_response, validation_failure_response};
use crate::state::AppState;

use ro_core::domain::value_objects::identifier::{Channel, Identifier};
use ro_core::repositories::AccountRepository;
use ro_core::services::gateway::{MailGateway, SmsGateway};
use ro_core::services::recovery::ChallengePurpose;

/// Start credential recovery for the account holding the identifier.
///
/// Issues a one-time code (phone) or reset link (email) and dispatches it
/// out-of-band; the code never appears in the response.
///
/// # Request Body
///
/// ```json
/// { "identifier": "ada@example.com" }
/// ```
///
/// # Responses
///
/// * `200 OK` - recovery code sent
/// * `404 Not Found` - no matching account
/// * `503 Service Unavailable` - notification dispatch failed
pub async fn forgot_password<R, S, M>(
    state: web::Data<AppState<R, S, M>>,
    request: web::Json<ForgotPasswordRequest>,
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
        "Processing forgot-password request"
    );

    match state
        .recovery_service
        .request_recovery(&identifier, ChallengePurpose::PasswordReset)
        .await
    {
        Ok(issued) => {
            let message = match issued.channel {
                Channel::Email => {
                    "A password reset link has been sent to your email address."
                }
                Channel::Phone => "A one-time code has been sent to your phone number.",
            };
            HttpResponse::Ok().json(ForgotPasswordResponse {
                message: message.to_string(),
                expires_at: issued.expires_at,
            })
        }
        Err(error) => domain_error_response(&error),
    }
}
