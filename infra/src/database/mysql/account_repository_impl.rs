//! MySQL implementation of the AccountRepository trait.
//!
//! Every consume operation is a single conditional UPDATE guarded by the
//! stored recovery code, so the row transition happens atomically relative to
//! any other writer: a code that was already consumed or replaced matches
//! zero rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ro_core::domain::entities::account::Account;
use ro_core::domain::value_objects::identifier::{Channel, Identifier};
use ro_core::errors::{AuthError, DomainError};
use ro_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = r#"
    id, investor_id, first_name, last_name, email, phone,
    password_hash, recovery_code, recovery_expires_at,
    email_verified, phone_verified,
    created_at, updated_at, last_login_at
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn store_err(e: sqlx::Error) -> DomainError {
        DomainError::Store {
            message: format!("Database query failed: {}", e),
        }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(Self::store_err)?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Store {
                message: format!("Invalid UUID in accounts.id: {}", e),
            })?,
            investor_id: row.try_get("investor_id").map_err(Self::store_err)?,
            first_name: row.try_get("first_name").map_err(Self::store_err)?,
            last_name: row.try_get("last_name").map_err(Self::store_err)?,
            email: row.try_get("email").map_err(Self::store_err)?,
            phone: row.try_get("phone").map_err(Self::store_err)?,
            password_hash: row.try_get("password_hash").map_err(Self::store_err)?,
            recovery_code: row.try_get("recovery_code").map_err(Self::store_err)?,
            recovery_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("recovery_expires_at")
                .map_err(Self::store_err)?,
            email_verified: row.try_get("email_verified").map_err(Self::store_err)?,
            phone_verified: row.try_get("phone_verified").map_err(Self::store_err)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(Self::store_err)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(Self::store_err)?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(Self::store_err)?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, DomainError> {
        let query = match identifier {
            Identifier::Email(_) => format!(
                "SELECT {} FROM accounts WHERE email = ? LIMIT 1",
                ACCOUNT_COLUMNS
            ),
            Identifier::Phone(_) => format!(
                "SELECT {} FROM accounts WHERE phone = ? LIMIT 1",
                ACCOUNT_COLUMNS
            ),
        };

        let result = sqlx::query(&query)
            .bind(identifier.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_err)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE id = ? LIMIT 1", ACCOUNT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_err)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, investor_id, first_name, last_name, email, phone,
                password_hash, recovery_code, recovery_expires_at,
                email_verified, phone_verified,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.investor_id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .bind(&account.recovery_code)
            .bind(account.recovery_expires_at)
            .bind(account.email_verified)
            .bind(account.phone_verified)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // Unique key collision on email/phone surfaces as a duplicate
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::DuplicateAccount {
                        field: "identity key".to_string(),
                    })
                }
                _ => Self::store_err(e),
            })?;

        Ok(account)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS taken";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::store_err)?;

        let taken: i8 = row.try_get("taken").map_err(Self::store_err)?;
        Ok(taken == 1)
    }

    async fn phone_taken(&self, phone: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE phone = ?) AS taken";

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::store_err)?;

        let taken: i8 = row.try_get("taken").map_err(Self::store_err)?;
        Ok(taken == 1)
    }

    async fn store_recovery(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE accounts SET
                recovery_code = ?,
                recovery_expires_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(code)
            .bind(expires_at)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::store_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }
        Ok(())
    }

    async fn consume_recovery_for_password(
        &self,
        id: Uuid,
        expected_code: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts SET
                password_hash = ?,
                recovery_code = NULL,
                recovery_expires_at = NULL,
                updated_at = ?
            WHERE id = ? AND recovery_code = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(expected_code)
            .execute(&self.pool)
            .await
            .map_err(Self::store_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn consume_recovery_for_verification(
        &self,
        id: Uuid,
        channel: Channel,
        expected_code: &str,
    ) -> Result<bool, DomainError> {
        let query = match channel {
            Channel::Email => {
                r#"
                UPDATE accounts SET
                    email_verified = TRUE,
                    recovery_code = NULL,
                    recovery_expires_at = NULL,
                    updated_at = ?
                WHERE id = ? AND recovery_code = ?
                "#
            }
            Channel::Phone => {
                r#"
                UPDATE accounts SET
                    phone_verified = TRUE,
                    recovery_code = NULL,
                    recovery_expires_at = NULL,
                    updated_at = ?
                WHERE id = ? AND recovery_code = ?
                "#
            }
        };

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(expected_code)
            .execute(&self.pool)
            .await
            .map_err(Self::store_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn assign_investor_id(&self, id: Uuid, investor_id: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts SET
                investor_id = ?,
                updated_at = ?
            WHERE id = ? AND investor_id IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(investor_id)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::store_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_login(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE accounts SET
                last_login_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(Self::store_err)?;

        Ok(())
    }
}
