//! Notification gateway traits.
//!
//! The recovery workflow only depends on the success or failure of a
//! dispatch; provider specifics live in the infrastructure layer. Errors are
//! provider messages, mapped to `AuthError::NotificationFailure` by callers.

use async_trait::async_trait;

/// Trait for the SMS notification channel
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send a one-time code to a phone number.
    ///
    /// Returns the provider message id on success.
    async fn send_otp(&self, phone: &str, code: &str, ttl_minutes: i64) -> Result<String, String>;
}

/// Trait for the email notification channel
#[async_trait]
pub trait MailGateway: Send + Sync {
    /// Send a password-reset link carrying the recovery token
    async fn send_reset_link(
        &self,
        email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String>;

    /// Send an address-verification link carrying the recovery token
    async fn send_verification_link(
        &self,
        email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String>;

    /// Send the onboarding-complete welcome message
    async fn send_welcome(&self, email: &str, recipient_name: &str) -> Result<String, String>;
}
