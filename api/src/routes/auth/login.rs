//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{domain_error_response, validation_failure_response};
use crate::state::AppState;

use ro_core::domain::value_objects::identifier::Identifier;
use ro_core::repositories::AccountRepository;
use ro_core::services::gateway::{MailGateway, SmsGateway};

/// Authenticate with an identifier (email or phone) and password.
///
/// # Responses
///
/// * `200 OK` - access token grant
/// * `401 Unauthorized` - wrong password
/// * `403 Forbidden` - identifier channel not yet verified
/// * `404 Not Found` - no matching account
pub async fn login<R, S, M>(
    state: web::Data<AppState<R, S, M>>,
    request: web::Json<LoginRequest>,
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

    tracing::info!(identifier = %identifier.masked(), "Processing login request");

    match state.auth_service.login(&identifier, &request.password).await {
        Ok(grant) => HttpResponse::Ok().json(LoginResponse {
            access_token: grant.access_token,
            token_type: grant.token_type,
            expires_in: grant.expires_in,
            investor_id: grant.investor_id,
        }),
        Err(error) => domain_error_response(&error),
    }
}
