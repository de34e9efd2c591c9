//! Credential-recovery workflow engine.

pub mod config;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::RecoveryConfig;
pub use service::RecoveryService;
pub use types::{ChallengeIssued, ChallengePurpose, ChannelConfirmation};
