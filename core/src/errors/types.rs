//! Error type definitions for authentication and the recovery workflow.
//!
//! Domain failures carry a stable machine-readable kind; the presentation
//! layer decides status codes and wire messages. Store and notification
//! failures are kept distinct from domain validation failures.

use thiserror::Error;

/// Authentication and recovery-workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("An account already exists for this {field}")]
    DuplicateAccount { field: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account channel is not verified")]
    AccountNotVerified,

    #[error("Invalid recovery code")]
    InvalidCode,

    #[error("Recovery code has expired")]
    CodeExpired,

    #[error("No active recovery request")]
    NoActiveRequest,

    #[error("Password confirmation does not match")]
    ConfirmationMismatch,

    #[error("Notification dispatch failed")]
    NotificationFailure,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
///
/// These never touch the store; they are raised before any repository call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn auth_errors_render_stable_messages() {
        assert_eq!(AuthError::AccountNotFound.to_string(), "Account not found");
        assert_eq!(
            AuthError::DuplicateAccount {
                field: "email".to_string()
            }
            .to_string(),
            "An account already exists for this email"
        );
    }

    #[test]
    fn specific_errors_bridge_into_domain_error() {
        let err: DomainError = AuthError::InvalidCode.into();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCode)));

        let err: DomainError = ValidationError::PasswordMismatch.into();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::PasswordMismatch)
        ));
    }

    #[test]
    fn validation_error_interpolates_fields() {
        let err = ValidationError::PasswordTooShort { min: 8 };
        assert!(err.to_string().contains('8'));
    }
}
