//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::identifier::{Channel, Identifier};
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// In-memory account repository for testing
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Directly insert an account, bypassing duplicate checks
    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Snapshot an account by id for assertions
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }

    /// Overwrite the stored expiry, for exercising the lazy-expiry path
    pub async fn force_expiry(&self, id: Uuid, expires_at: DateTime<Utc>) {
        if let Some(account) = self.accounts.write().await.get_mut(&id) {
            account.recovery_expires_at = Some(expires_at);
        }
    }

    fn matches_identifier(account: &Account, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::Email(email) => account.email == *email,
            Identifier::Phone(phone) => account.phone.as_deref() == Some(phone.as_str()),
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| Self::matches_identifier(a, identifier))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::DuplicateAccount {
                field: "email".to_string(),
            }
            .into());
        }
        if let Some(phone) = &account.phone {
            if accounts.values().any(|a| a.phone.as_ref() == Some(phone)) {
                return Err(AuthError::DuplicateAccount {
                    field: "phone".to_string(),
                }
                .into());
            }
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn phone_taken(&self, phone: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.phone.as_deref() == Some(phone)))
    }

    async fn store_recovery(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "Account".to_string(),
        })?;
        account.recovery_code = Some(code.to_string());
        account.recovery_expires_at = Some(expires_at);
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn consume_recovery_for_password(
        &self,
        id: Uuid,
        expected_code: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) if account.recovery_code.as_deref() == Some(expected_code) => {
                account.reset_password(password_hash.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn consume_recovery_for_verification(
        &self,
        id: Uuid,
        channel: Channel,
        expected_code: &str,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) if account.recovery_code.as_deref() == Some(expected_code) => {
                account.confirm_channel(channel);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn assign_investor_id(&self, id: Uuid, investor_id: &str) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id) {
            Some(account) if account.investor_id.is_none() => {
                account.investor_id = Some(investor_id.to_string());
                account.updated_at = Utc::now();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::NotFound {
                resource: "Account".to_string(),
            }),
        }
    }

    async fn record_login(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.record_login();
        }
        Ok(())
    }
}
