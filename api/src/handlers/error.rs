//! Domain error to HTTP response mapping.
//!
//! Domain errors keep a stable machine-readable code; store and internal
//! failures collapse into a generic response with the detail logged
//! server-side only.

use actix_web::HttpResponse;
use std::collections::HashMap;

use ro_core::errors::{AuthError, DomainError};
use ro_shared::types::response::ErrorResponse;

/// Convert a domain error into the appropriate HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => auth_error_response(auth_error),

        DomainError::Token(_) => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "invalid_token",
            "The supplied token is invalid or expired",
        )),

        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error", validation_error.to_string()),
        ),

        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} not found", resource),
        )),

        DomainError::Store { message } => {
            tracing::error!(detail = %message, "Store failure");
            internal_error_response()
        }

        DomainError::Internal { message } => {
            tracing::error!(detail = %message, "Internal failure");
            internal_error_response()
        }
    }
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::AccountNotFound => HttpResponse::NotFound()
            .json(ErrorResponse::new("account_not_found", error.to_string())),

        AuthError::DuplicateAccount { .. } => HttpResponse::Conflict()
            .json(ErrorResponse::new("duplicate_account", error.to_string())),

        AuthError::InvalidCredentials => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("invalid_credentials", error.to_string())),

        AuthError::AccountNotVerified => HttpResponse::Forbidden()
            .json(ErrorResponse::new("account_not_verified", error.to_string())),

        AuthError::InvalidCode => {
            HttpResponse::BadRequest().json(ErrorResponse::new("invalid_code", error.to_string()))
        }

        AuthError::CodeExpired => {
            HttpResponse::BadRequest().json(ErrorResponse::new("code_expired", error.to_string()))
        }

        AuthError::NoActiveRequest => HttpResponse::BadRequest()
            .json(ErrorResponse::new("no_active_request", error.to_string())),

        AuthError::ConfirmationMismatch => HttpResponse::BadRequest().json(ErrorResponse::new(
            "confirmation_mismatch",
            error.to_string(),
        )),

        AuthError::NotificationFailure => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new("notification_failure", error.to_string()),
        ),
    }
}

fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "internal_error",
        "An internal error occurred",
    ))
}

/// Convert field-level DTO validation failures into a 400 response
pub fn validation_failure_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, serde_json::Value> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!(messages));
    }

    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Request validation failed").with_details(fields),
    )
}
