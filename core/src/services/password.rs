//! Password hashing helpers.
//!
//! Passwords are stored only as bcrypt hashes; the plaintext never leaves the
//! signup/login/reset call stack.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

/// Hash a plaintext password with the default bcrypt cost
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    verify(password, password_hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}
