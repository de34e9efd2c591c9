//! Signup and login service implementation.

use std::sync::Arc;

use ro_shared::utils::validation::{
    is_valid_email, is_valid_password, is_valid_phone, not_empty, MIN_PASSWORD_LENGTH,
};

use crate::domain::entities::account::Account;
use crate::domain::value_objects::grant::LoginGrant;
use crate::domain::value_objects::identifier::{mask_phone, Channel, Identifier};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::gateway::{MailGateway, SmsGateway};
use crate::services::password;
use crate::services::recovery::{ChallengePurpose, RecoveryService};
use crate::services::token::TokenService;

/// Signup input, already deserialized but not yet validated
#[derive(Debug, Clone)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Authentication service for account creation and login
pub struct AuthService<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Account repository for persistence
    accounts: Arc<R>,
    /// Recovery engine, used to issue the initial verification challenge
    recovery_service: Arc<RecoveryService<R, S, M>>,
    /// Token service for session grants
    token_service: Arc<TokenService>,
}

impl<R, S, M> AuthService<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Create a new authentication service
    pub fn new(
        accounts: Arc<R>,
        recovery_service: Arc<RecoveryService<R, S, M>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            recovery_service,
            token_service,
        }
    }

    /// Register a new account.
    ///
    /// Input validation runs entirely before the store is touched. After the
    /// row exists, the initial email verification challenge is dispatched
    /// best-effort: a gateway failure is logged and signup still succeeds.
    pub async fn signup(&self, signup: Signup) -> DomainResult<Account> {
        Self::validate_signup(&signup)?;

        if self.accounts.email_taken(&signup.email).await? {
            return Err(AuthError::DuplicateAccount {
                field: "email".to_string(),
            }
            .into());
        }
        if let Some(phone) = &signup.phone {
            if self.accounts.phone_taken(phone).await? {
                return Err(AuthError::DuplicateAccount {
                    field: "phone".to_string(),
                }
                .into());
            }
        }

        let password_hash = password::hash_password(&signup.password)?;
        let account = self
            .accounts
            .create(Account::new(
                signup.first_name,
                signup.last_name,
                signup.email,
                signup.phone,
                password_hash,
            ))
            .await?;

        tracing::info!(account_id = %account.id, "Account created");

        match self
            .recovery_service
            .issue_challenge(&account, Channel::Email, ChallengePurpose::ChannelVerification)
            .await
        {
            Ok(issued) => {
                tracing::info!(
                    account_id = %account.id,
                    message_id = %issued.message_id,
                    "Initial verification notification sent"
                );
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Initial verification notification failed"
                );
            }
        }

        Ok(account)
    }

    /// Authenticate and return a session grant.
    ///
    /// The channel named by the identifier must be verified before login is
    /// allowed through it.
    pub async fn login(&self, identifier: &Identifier, submitted: &str) -> DomainResult<LoginGrant> {
        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !password::verify_password(submitted, &account.password_hash)? {
            tracing::warn!(
                identifier = %identifier.masked(),
                "Login rejected: bad credentials"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.channel_verified(identifier.channel()) {
            return Err(AuthError::AccountNotVerified.into());
        }

        self.accounts.record_login(account.id).await?;
        let access = self.token_service.issue(account.id)?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(LoginGrant::bearer(
            access.token,
            access.expires_in,
            account.investor_id.clone(),
        ))
    }

    /// Field-level signup validation; never touches the store
    fn validate_signup(signup: &Signup) -> Result<(), ValidationError> {
        if !not_empty(&signup.first_name) {
            return Err(ValidationError::RequiredField {
                field: "first_name".to_string(),
            });
        }
        if !not_empty(&signup.last_name) {
            return Err(ValidationError::RequiredField {
                field: "last_name".to_string(),
            });
        }
        if !is_valid_email(&signup.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if let Some(phone) = &signup.phone {
            if !is_valid_phone(phone) {
                return Err(ValidationError::InvalidPhoneFormat {
                    phone: mask_phone(phone),
                });
            }
        }
        if !is_valid_password(&signup.password) {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if signup.password != signup.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}
