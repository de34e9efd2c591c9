//! Twilio SMS gateway implementation
//!
//! Sends one-time codes through the Twilio Messages API. Requests are
//! form-encoded POSTs authenticated with the account SID and auth token; the
//! request timeout bounds how long a dispatch can hold up a response.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use ro_core::domain::value_objects::identifier::mask_phone;
use ro_core::services::gateway::SmsGateway;

use crate::InfrastructureError;

/// Twilio gateway configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio SMS gateway client
pub struct TwilioSmsClient {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsClient {
    /// Create a new Twilio client
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_phone(&config.from_number),
            "Twilio SMS gateway initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwilioConfig::from_env()?)
    }

    async fn send_message(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        );

        debug!(to = %mask_phone(to), "Dispatching SMS via Twilio");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(
                to = %mask_phone(to),
                %status,
                "Twilio rejected the message"
            );
            return Err(InfrastructureError::Sms(format!(
                "Twilio returned {}: {}",
                status, detail
            )));
        }

        let message: MessageResponse = response.json().await?;
        info!(
            to = %mask_phone(to),
            sid = %message.sid,
            "SMS dispatched"
        );
        Ok(message.sid)
    }
}

#[async_trait]
impl SmsGateway for TwilioSmsClient {
    async fn send_otp(&self, phone: &str, code: &str, ttl_minutes: i64) -> Result<String, String> {
        let body = format!(
            "Your RealOne Invest code is {}. It is valid for {} minutes.",
            code, ttl_minutes
        );
        self.send_message(phone, &body)
            .await
            .map_err(|e| e.to_string())
    }
}
