//! Recovery service configuration

use crate::domain::entities::recovery::DEFAULT_TTL_MINUTES;

/// Configuration for the recovery workflow
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Validity window of an issued code or token, in minutes
    pub code_ttl_minutes: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}

impl RecoveryConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            code_ttl_minutes: std::env::var("RECOVERY_CODE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MINUTES),
        }
    }
}
