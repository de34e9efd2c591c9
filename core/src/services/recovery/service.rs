//! Recovery workflow engine implementation.
//!
//! Drives the two-phase recovery sequence: issue a challenge on the channel
//! the identifier addresses, then consume it either to reset the password or
//! to mark the channel verified. Expiry is enforced lazily at consumption
//! time; the store's conditional updates guarantee a code is accepted at most
//! once even under concurrent attempts.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::recovery::RecoveryChallenge;
use crate::domain::value_objects::identifier::{Channel, Identifier};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::gateway::{MailGateway, SmsGateway};
use crate::services::password;

use super::config::RecoveryConfig;
use super::types::{ChallengeIssued, ChallengePurpose, ChannelConfirmation};

/// Recovery workflow engine
pub struct RecoveryService<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Account repository for persistence
    accounts: Arc<R>,
    /// SMS channel of the notification gateway
    sms_gateway: Arc<S>,
    /// Email channel of the notification gateway
    mail_gateway: Arc<M>,
    /// Service configuration
    config: RecoveryConfig,
}

impl<R, S, M> RecoveryService<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Create a new recovery service
    pub fn new(
        accounts: Arc<R>,
        sms_gateway: Arc<S>,
        mail_gateway: Arc<M>,
        config: RecoveryConfig,
    ) -> Self {
        Self {
            accounts,
            sms_gateway,
            mail_gateway,
            config,
        }
    }

    /// Issue a recovery challenge for the account holding `identifier`.
    ///
    /// Generates a fresh one-time code (phone) or opaque token (email),
    /// persists it together with its expiry in a single update that replaces
    /// any previous challenge, then dispatches exactly one notification on
    /// the matching channel.
    pub async fn request_recovery(
        &self,
        identifier: &Identifier,
        purpose: ChallengePurpose,
    ) -> DomainResult<ChallengeIssued> {
        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        self.issue_challenge(&account, identifier.channel(), purpose)
            .await
    }

    /// Issue a challenge for an already-loaded account.
    ///
    /// Used by signup to dispatch the initial email verification without a
    /// second lookup.
    pub async fn issue_challenge(
        &self,
        account: &Account,
        channel: Channel,
        purpose: ChallengePurpose,
    ) -> DomainResult<ChallengeIssued> {
        let challenge = match channel {
            Channel::Phone => RecoveryChallenge::new_otp(self.config.code_ttl_minutes),
            Channel::Email => RecoveryChallenge::new_token(self.config.code_ttl_minutes),
        };

        self.accounts
            .store_recovery(account.id, &challenge.code, challenge.expires_at)
            .await?;

        tracing::info!(
            account_id = %account.id,
            channel = %channel,
            expires_at = %challenge.expires_at,
            "Issued recovery challenge"
        );

        let dispatch = match channel {
            Channel::Phone => {
                let phone = account.phone.as_deref().ok_or_else(|| DomainError::Internal {
                    message: "Account has no phone number for the phone channel".to_string(),
                })?;
                self.sms_gateway
                    .send_otp(phone, &challenge.code, self.config.code_ttl_minutes)
                    .await
            }
            Channel::Email => match purpose {
                ChallengePurpose::PasswordReset => {
                    self.mail_gateway
                        .send_reset_link(&account.email, &account.first_name, &challenge.code)
                        .await
                }
                ChallengePurpose::ChannelVerification => {
                    self.mail_gateway
                        .send_verification_link(&account.email, &account.first_name, &challenge.code)
                        .await
                }
            },
        };

        match dispatch {
            Ok(message_id) => Ok(ChallengeIssued {
                channel,
                expires_at: challenge.expires_at,
                message_id,
            }),
            Err(e) => {
                // The stored challenge stays authoritative; the caller may retry
                // dispatch by requesting again.
                tracing::warn!(
                    account_id = %account.id,
                    channel = %channel,
                    error = %e,
                    "Recovery notification dispatch failed"
                );
                Err(AuthError::NotificationFailure.into())
            }
        }
    }

    /// Consume a challenge to replace the account password.
    ///
    /// Validation runs in a fixed order, each step a distinct terminal
    /// failure: unknown account, no active challenge, expired challenge,
    /// wrong code, mismatched confirmation.
    pub async fn complete_recovery(
        &self,
        identifier: &Identifier,
        submitted_code: &str,
        new_password: &str,
        confirm_password: Option<&str>,
    ) -> DomainResult<()> {
        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let challenge = self.validate_challenge(&account, submitted_code)?;

        if let Some(confirm) = confirm_password {
            if confirm != new_password {
                return Err(AuthError::ConfirmationMismatch.into());
            }
        }

        let password_hash = password::hash_password(new_password)?;
        let consumed = self
            .accounts
            .consume_recovery_for_password(account.id, &challenge.code, &password_hash)
            .await?;
        if !consumed {
            // Lost the race against another consumer or a newer challenge
            return Err(AuthError::NoActiveRequest.into());
        }

        tracing::info!(
            account_id = %account.id,
            identifier = %identifier.masked(),
            "Password reset completed"
        );
        Ok(())
    }

    /// Consume a challenge to mark the identifier's channel verified.
    ///
    /// On the final verification that completes onboarding, assigns the
    /// public investor identifier and dispatches a welcome notification
    /// (best effort).
    pub async fn verify_channel(
        &self,
        identifier: &Identifier,
        submitted_code: &str,
    ) -> DomainResult<ChannelConfirmation> {
        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let challenge = self.validate_challenge(&account, submitted_code)?;

        let channel = identifier.channel();
        let consumed = self
            .accounts
            .consume_recovery_for_verification(account.id, channel, &challenge.code)
            .await?;
        if !consumed {
            return Err(AuthError::NoActiveRequest.into());
        }

        tracing::info!(
            account_id = %account.id,
            channel = %channel,
            "Channel verified"
        );

        let verified = self
            .accounts
            .find_by_id(account.id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let mut investor_id = verified.investor_id.clone();
        if verified.fully_verified() && investor_id.is_none() {
            let candidate = Self::generate_investor_id();
            if self
                .accounts
                .assign_investor_id(account.id, &candidate)
                .await?
            {
                tracing::info!(
                    account_id = %account.id,
                    investor_id = %candidate,
                    "Onboarding complete, investor id assigned"
                );
                if let Err(e) = self
                    .mail_gateway
                    .send_welcome(&verified.email, &verified.first_name)
                    .await
                {
                    tracing::warn!(
                        account_id = %account.id,
                        error = %e,
                        "Welcome notification dispatch failed"
                    );
                }
                investor_id = Some(candidate);
            }
        }

        Ok(ChannelConfirmation {
            channel,
            fully_verified: verified.fully_verified(),
            investor_id,
        })
    }

    /// Shared steps 2-4 of the consumption validation order
    fn validate_challenge(
        &self,
        account: &Account,
        submitted_code: &str,
    ) -> DomainResult<RecoveryChallenge> {
        let challenge = account
            .active_challenge()
            .ok_or(AuthError::NoActiveRequest)?;
        if challenge.is_expired() {
            return Err(AuthError::CodeExpired.into());
        }
        if !challenge.matches(submitted_code) {
            return Err(AuthError::InvalidCode.into());
        }
        Ok(challenge)
    }

    /// Generate a public investor identifier from a fresh UUID
    fn generate_investor_id() -> String {
        let raw = Uuid::new_v4().simple().to_string();
        format!("RO-{}", raw[..12].to_uppercase())
    }
}
