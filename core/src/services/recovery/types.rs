//! Result and intent types for the recovery workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::identifier::Channel;

/// What an issued challenge is meant to prove.
///
/// The stored state is identical either way; the purpose only selects the
/// outbound message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengePurpose {
    /// Forgot-password flow: the code authorizes a credential reset
    PasswordReset,
    /// Onboarding flow: the code proves control of the channel
    ChannelVerification,
}

/// Outcome of a successful challenge issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeIssued {
    /// Channel the challenge was dispatched on
    pub channel: Channel,

    /// When the challenge stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Provider message id of the dispatched notification
    pub message_id: String,
}

/// Outcome of a successful channel verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfirmation {
    /// Channel that was verified
    pub channel: Channel,

    /// Whether every channel present on the account is now verified
    pub fully_verified: bool,

    /// Public investor identifier, present once onboarding has completed
    pub investor_id: Option<String>,
}
