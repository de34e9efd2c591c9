//! Mock SMS gateway implementation
//!
//! Logs messages instead of sending them. Used in development and tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ro_core::domain::value_objects::identifier::mask_phone;
use ro_core::services::gateway::SmsGateway;

/// Mock SMS gateway for development and testing
#[derive(Clone, Default)]
pub struct MockSmsClient {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsClient {
    /// Create a new mock SMS gateway
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
}

#[async_trait]
impl SmsGateway for MockSmsClient {
    async fn send_otp(&self, phone: &str, code: &str, ttl_minutes: i64) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                phone = %mask_phone(phone),
                "Mock SMS gateway simulating failure"
            );
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_gateway",
            provider = "mock",
            phone = %mask_phone(phone),
            message_id = %message_id,
            message_number = count,
            code = %code,
            ttl_minutes,
            "SMS sent (mock)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_returns_mock_message_id_and_counts() {
        let gateway = MockSmsClient::new();

        let id = gateway.send_otp("+14155552671", "123456", 15).await.unwrap();
        assert!(id.starts_with("mock_"));
        assert_eq!(gateway.message_count(), 1);

        gateway.send_otp("+14155552671", "654321", 15).await.unwrap();
        assert_eq!(gateway.message_count(), 2);
    }

    #[tokio::test]
    async fn simulated_failure_returns_error() {
        let gateway = MockSmsClient::new();
        gateway.set_simulate_failure(true);

        let result = gateway.send_otp("+14155552671", "123456", 15).await;
        assert!(result.is_err());
        assert_eq!(gateway.message_count(), 0);
    }
}
