//! Authentication and recovery DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    /// Phone number in E.164 format, e.g. "+14155552671"
    #[validate(length(min = 8, max = 16))]
    pub phone_number: Option<String>,

    /// Bcrypt input is capped at 72 bytes
    #[validate(length(min = 8, max = 72))]
    pub password: String,

    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub account_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or E.164 phone number
    #[validate(length(min = 3, max = 255))]
    pub identifier: String,

    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address or E.164 phone number
    #[validate(length(min = 3, max = 255))]
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    /// When the issued code or link stops being accepted
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 3, max = 255))]
    pub identifier: String,

    /// 6-digit code (phone channel) or opaque token (email channel)
    #[validate(length(min = 6, max = 64))]
    pub code: String,

    #[validate(length(min = 8, max = 72))]
    pub new_password: String,

    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 3, max = 255))]
    pub identifier: String,

    #[validate(length(min = 6, max = 64))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub message: String,
    /// Present on the final verification that completes onboarding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<String>,
}
