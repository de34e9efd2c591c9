//! Account entity representing a registered investor identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::recovery::RecoveryChallenge;
use crate::domain::value_objects::identifier::Channel;

/// Account entity holding one identity plus its current recovery state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Public investor identifier, assigned once onboarding verification completes
    pub investor_id: Option<String>,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address, unique across accounts
    pub email: String,

    /// Phone number in E.164 format, unique when present
    pub phone: Option<String>,

    /// Bcrypt hash of the current password
    pub password_hash: String,

    /// Active one-time recovery code or token, if any
    pub recovery_code: Option<String>,

    /// Expiry of the active recovery code
    pub recovery_expires_at: Option<DateTime<Utc>>,

    /// Whether the email channel has been verified
    pub email_verified: bool,

    /// Whether the phone channel has been verified
    pub phone_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new unverified account with no active recovery state
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            investor_id: None,
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            recovery_code: None,
            recovery_expires_at: None,
            email_verified: false,
            phone_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The active recovery challenge, reconstructed from the stored columns.
    ///
    /// Returns `None` unless both the code and its expiry are present.
    pub fn active_challenge(&self) -> Option<RecoveryChallenge> {
        match (&self.recovery_code, self.recovery_expires_at) {
            (Some(code), Some(expires_at)) => Some(RecoveryChallenge {
                code: code.clone(),
                expires_at,
            }),
            _ => None,
        }
    }

    /// Whether the given channel has been verified
    pub fn channel_verified(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email_verified,
            Channel::Phone => self.phone_verified,
        }
    }

    /// Marks the given channel as verified and clears the recovery state
    pub fn confirm_channel(&mut self, channel: Channel) {
        match channel {
            Channel::Email => self.email_verified = true,
            Channel::Phone => self.phone_verified = true,
        }
        self.recovery_code = None;
        self.recovery_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether every channel present on the account is verified
    pub fn fully_verified(&self) -> bool {
        self.email_verified && (self.phone.is_none() || self.phone_verified)
    }

    /// Stores a recovery challenge, replacing any previous one
    pub fn set_recovery(&mut self, challenge: &RecoveryChallenge) {
        self.recovery_code = Some(challenge.code.clone());
        self.recovery_expires_at = Some(challenge.expires_at);
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash and clears the recovery state
    pub fn reset_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.recovery_code = None;
        self.recovery_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::recovery::RecoveryChallenge;

    fn sample_account() -> Account {
        Account::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            "ada@example.com".to_string(),
            Some("+14155552671".to_string()),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn new_account_starts_unverified_with_no_recovery() {
        let account = sample_account();
        assert!(account.investor_id.is_none());
        assert!(!account.email_verified);
        assert!(!account.phone_verified);
        assert!(account.active_challenge().is_none());
        assert!(account.last_login_at.is_none());
        assert_eq!(account.full_name(), "Ada Lovelace");
    }

    #[test]
    fn set_recovery_replaces_previous_challenge() {
        let mut account = sample_account();
        let first = RecoveryChallenge::new_otp(15);
        let second = RecoveryChallenge::new_otp(15);

        account.set_recovery(&first);
        account.set_recovery(&second);

        let active = account.active_challenge().unwrap();
        assert_eq!(active.code, second.code);
    }

    #[test]
    fn reset_password_clears_recovery_state() {
        let mut account = sample_account();
        account.set_recovery(&RecoveryChallenge::new_otp(15));

        account.reset_password("$2b$12$newhash".to_string());

        assert_eq!(account.password_hash, "$2b$12$newhash");
        assert!(account.recovery_code.is_none());
        assert!(account.recovery_expires_at.is_none());
    }

    #[test]
    fn confirm_channel_sets_flag_and_clears_code() {
        let mut account = sample_account();
        account.set_recovery(&RecoveryChallenge::new_token(15));

        account.confirm_channel(Channel::Email);

        assert!(account.email_verified);
        assert!(!account.phone_verified);
        assert!(account.active_challenge().is_none());
    }

    #[test]
    fn fully_verified_requires_all_present_channels() {
        let mut account = sample_account();
        account.confirm_channel(Channel::Email);
        assert!(!account.fully_verified());

        account.confirm_channel(Channel::Phone);
        assert!(account.fully_verified());
    }

    #[test]
    fn account_without_phone_is_fully_verified_by_email_alone() {
        let mut account = Account::new(
            "Grace".to_string(),
            "Hopper".to_string(),
            "grace@example.com".to_string(),
            None,
            "$2b$12$hash".to_string(),
        );
        account.confirm_channel(Channel::Email);
        assert!(account.fully_verified());
    }

    #[test]
    fn active_challenge_requires_both_columns() {
        let mut account = sample_account();
        account.recovery_code = Some("123456".to_string());
        assert!(account.active_challenge().is_none());
    }
}
