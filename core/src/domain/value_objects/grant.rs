//! Login grant returned by a successful authentication.

use serde::{Deserialize, Serialize};

/// The session grant handed back to a caller after login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginGrant {
    /// Signed access token
    pub access_token: String,

    /// Token scheme for the Authorization header
    pub token_type: String,

    /// Seconds until the access token expires
    pub expires_in: i64,

    /// Public investor identifier, when onboarding has completed
    pub investor_id: Option<String>,
}

impl LoginGrant {
    /// Creates a bearer grant
    pub fn bearer(access_token: String, expires_in: i64, investor_id: Option<String>) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            investor_id,
        }
    }
}
