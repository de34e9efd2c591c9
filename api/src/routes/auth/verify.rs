//! Handler for POST /api/v1/auth/verify

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{VerifyRequest, VerifyResponse};
use crate::handlers::error::{domain_error_response, validation_failure_response};
use crate::state::AppState;

use ro_core::domain::value_objects::identifier::Identifier;
use ro_core::repositories::AccountRepository;
use ro_core::services::gateway::{MailGateway, SmsGateway};

/// Verify control of the identifier's channel with a previously issued code.
///
/// The final verification that completes onboarding also returns the newly
/// assigned investor id.
///
/// # Responses
///
/// * `200 OK` - channel verified
/// * `400 Bad Request` - invalid/expired code, no active request
/// * `404 Not Found` - no matching account
pub async fn verify<R, S, M>(
    state: web::Data<AppState<R, S, M>>,
    request: web::Json<VerifyRequest>,
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

    tracing::info!(identifier = %identifier.masked(), "Processing verify request");

    match state
        .recovery_service
        .verify_channel(&identifier, &request.code)
        .await
    {
        Ok(confirmation) => {
            let message = if confirmation.fully_verified {
                format!("Your {} is verified and onboarding is complete.", confirmation.channel)
            } else {
                format!("Your {} is verified.", confirmation.channel)
            };
            HttpResponse::Ok().json(VerifyResponse {
                message,
                investor_id: confirmation.investor_id,
            })
        }
        Err(error) => domain_error_response(&error),
    }
}
