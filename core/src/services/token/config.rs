//! Token service configuration

/// Configuration for access token issuance
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret for HS256
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Token issuer claim
    pub issuer: String,

    /// Token audience claim
    pub audience: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("development-secret-change-me"),
            access_token_ttl_minutes: 60,
            issuer: String::from("realone-invest"),
            audience: String::from("realone-invest-api"),
        }
    }
}

impl TokenConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            access_token_ttl_minutes: std::env::var("JWT_ACCESS_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_ttl_minutes),
            issuer: defaults.issuer,
            audience: defaults.audience,
        }
    }
}
