//! Account repository trait defining the interface for account persistence.
//!
//! The recovery workflow relies on the store for all concurrency control:
//! challenge issuance is a plain overwrite (last writer wins), while the two
//! consume operations are conditional writes that succeed for at most one
//! caller per issued code. Implementations must make each of these a single
//! atomic statement or transaction against the account row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::identifier::{Channel, Identifier};
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its identity key (email or phone)
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - account found
    /// * `Ok(None)` - no account holds the identity key
    /// * `Err(DomainError)` - store failure
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// Fails with `AuthError::DuplicateAccount` when the email or phone is
    /// already registered.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Check whether an email address is already registered
    async fn email_taken(&self, email: &str) -> Result<bool, DomainError>;

    /// Check whether a phone number is already registered
    async fn phone_taken(&self, phone: &str) -> Result<bool, DomainError>;

    /// Store a recovery code and its expiry on the account.
    ///
    /// Overwrites any previous pair: at most one challenge is live per
    /// account, and issuing a new one invalidates its predecessor.
    async fn store_recovery(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Atomically replace the password hash and clear the recovery fields,
    /// conditional on the stored code still equalling `expected_code`.
    ///
    /// # Returns
    /// * `Ok(true)` - the row was updated; the code is now consumed
    /// * `Ok(false)` - no row matched (code already consumed or replaced)
    async fn consume_recovery_for_password(
        &self,
        id: Uuid,
        expected_code: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Atomically mark a channel verified and clear the recovery fields,
    /// conditional on the stored code still equalling `expected_code`.
    ///
    /// Same consumption contract as
    /// [`consume_recovery_for_password`](Self::consume_recovery_for_password).
    async fn consume_recovery_for_verification(
        &self,
        id: Uuid,
        channel: Channel,
        expected_code: &str,
    ) -> Result<bool, DomainError>;

    /// Assign the public investor identifier, only if none is set yet.
    ///
    /// # Returns
    /// * `Ok(true)` - the identifier was assigned
    /// * `Ok(false)` - the account already carries one
    async fn assign_investor_id(&self, id: Uuid, investor_id: &str) -> Result<bool, DomainError>;

    /// Update the last-login timestamp
    async fn record_login(&self, id: Uuid) -> Result<(), DomainError>;
}
