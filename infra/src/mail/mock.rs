//! Mock mail gateway implementation
//!
//! Logs messages instead of sending them. Used in development and tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ro_core::domain::value_objects::identifier::mask_email;
use ro_core::services::gateway::MailGateway;

/// Mock mail gateway for development and testing
#[derive(Clone, Default)]
pub struct MockMailClient {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockMailClient {
    /// Create a new mock mail gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn record(&self, kind: &str, email: &str, detail: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                email = %mask_email(email),
                kind,
                "Mock mail gateway simulating failure"
            );
            return Err("Simulated mail sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mail_gateway",
            provider = "mock",
            email = %mask_email(email),
            message_id = %message_id,
            message_number = count,
            kind,
            detail,
            "Mail sent (mock)"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl MailGateway for MockMailClient {
    async fn send_reset_link(
        &self,
        email: &str,
        _recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        self.record("reset_link", email, token)
    }

    async fn send_verification_link(
        &self,
        email: &str,
        _recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        self.record("verification_link", email, token)
    }

    async fn send_welcome(&self, email: &str, _recipient_name: &str) -> Result<String, String> {
        self.record("welcome", email, "")
    }
}
