//! Mailgun mail gateway implementation
//!
//! Sends reset links, verification links, and the welcome message through the
//! Mailgun Messages API. Same dispatch shape as the SMS client: form-encoded
//! POST, basic auth, bounded request timeout.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use ro_core::domain::value_objects::identifier::mask_email;
use ro_core::services::gateway::MailGateway;

use crate::InfrastructureError;

/// Mailgun gateway configuration
#[derive(Debug, Clone)]
pub struct MailgunConfig {
    /// Mailgun API key
    pub api_key: String,
    /// Sending domain registered with Mailgun
    pub domain: String,
    /// From address, e.g. "RealOne Invest <no-reply@realoneinvest.com>"
    pub from_address: String,
    /// Base URL links in outgoing mail point at
    pub link_base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl MailgunConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("MAILGUN_API_KEY")
            .map_err(|_| InfrastructureError::Config("MAILGUN_API_KEY not set".to_string()))?;
        let domain = std::env::var("MAILGUN_DOMAIN")
            .map_err(|_| InfrastructureError::Config("MAILGUN_DOMAIN not set".to_string()))?;
        let from_address = std::env::var("MAIL_FROM_ADDRESS")
            .unwrap_or_else(|_| format!("RealOne Invest <no-reply@{}>", domain));
        let link_base_url = std::env::var("MAIL_LINK_BASE_URL")
            .unwrap_or_else(|_| "https://app.realoneinvest.com".to_string());

        Ok(Self {
            api_key,
            domain,
            from_address,
            link_base_url,
            request_timeout_secs: std::env::var("MAILGUN_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Mailgun mail gateway client
pub struct MailgunMailClient {
    client: reqwest::Client,
    config: MailgunConfig,
}

impl MailgunMailClient {
    /// Create a new Mailgun client
    pub fn new(config: MailgunConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(domain = %config.domain, "Mailgun mail gateway initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailgunConfig::from_env()?)
    }

    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let url = format!(
            "https://api.mailgun.net/v3/{}/messages",
            self.config.domain
        );

        debug!(to = %mask_email(to), subject, "Dispatching mail via Mailgun");

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&[
                ("from", self.config.from_address.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(
                to = %mask_email(to),
                %status,
                "Mailgun rejected the message"
            );
            return Err(InfrastructureError::Mail(format!(
                "Mailgun returned {}: {}",
                status, detail
            )));
        }

        let sent: SendResponse = response.json().await?;
        info!(
            to = %mask_email(to),
            message_id = %sent.id,
            "Mail dispatched"
        );
        Ok(sent.id)
    }
}

#[async_trait]
impl MailGateway for MailgunMailClient {
    async fn send_reset_link(
        &self,
        email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        let link = format!("{}/reset-password/{}", self.config.link_base_url, token);
        let body = format!(
            "Hello {},\n\nClick the link below to reset your password:\n\n{}\n\n\
             If you did not request this, please ignore this email.",
            recipient_name, link
        );
        self.send_message(email, "Password Reset Request", &body)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_verification_link(
        &self,
        email: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        let link = format!("{}/verify-email/{}", self.config.link_base_url, token);
        let body = format!(
            "Hello {},\n\nWelcome to RealOne Invest. Click the link below to verify \
             your email address:\n\n{}",
            recipient_name, link
        );
        self.send_message(email, "Verify your email address", &body)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_welcome(&self, email: &str, recipient_name: &str) -> Result<String, String> {
        let body = format!(
            "Hello {},\n\nYour account is fully verified and your investor profile \
             is ready. You can now sign in and start investing.",
            recipient_name
        );
        self.send_message(email, "Welcome to RealOne Invest", &body)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_api_key() {
        std::env::remove_var("MAILGUN_API_KEY");
        let result = MailgunConfig::from_env();
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
