//! Handler for POST /api/v1/auth/signup

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::handlers::error::{domain_error_response, validation_failure_response};
use crate::state::AppState;

use ro_core::domain::value_objects::identifier::mask_email;
use ro_core::repositories::AccountRepository;
use ro_core::services::auth::Signup;
use ro_core::services::gateway::{MailGateway, SmsGateway};

/// Register a new account.
///
/// # Request Body
///
/// ```json
/// {
///     "first_name": "Ada",
///     "last_name": "Lovelace",
///     "email": "ada@example.com",
///     "phone_number": "+14155552671",
///     "password": "StrongPass1!",
///     "confirm_password": "StrongPass1!"
/// }
/// ```
///
/// # Responses
///
/// * `201 Created` - account stored, initial verification mail dispatched
/// * `400 Bad Request` - validation failure
/// * `409 Conflict` - email or phone already registered
/// * `500 Internal Server Error` - store failure
pub async fn signup<R, S, M>(
    state: web::Data<AppState<R, S, M>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    S: SmsGateway + 'static,
    M: MailGateway + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure_response(&errors);
    }

    let request = request.into_inner();
    tracing::info!(email = %mask_email(&request.email), "Processing signup request");

    let signup = Signup {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone_number,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.auth_service.signup(signup).await {
        Ok(account) => HttpResponse::Created().json(SignupResponse {
            message: "Account created. Check your inbox to verify your email address."
                .to_string(),
            account_id: account.id,
        }),
        Err(error) => domain_error_response(&error),
    }
}
