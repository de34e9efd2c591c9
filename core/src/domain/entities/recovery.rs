//! Recovery challenge entity backing the credential-recovery workflow.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a numeric one-time code
pub const OTP_LENGTH: usize = 6;

/// Default validity window for recovery challenges (15 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 15;

/// A one-time credential-recovery challenge.
///
/// The phone channel issues a fixed-width numeric code typed by the user; the
/// email channel issues an opaque token delivered inside a link. Both share
/// the same storage and the same verification rules: valid until `expires_at`,
/// consumed (cleared) on first acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryChallenge {
    /// The code or token value
    pub code: String,

    /// Timestamp when the challenge stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl RecoveryChallenge {
    /// Creates a numeric one-time code challenge for the phone channel
    pub fn new_otp(ttl_minutes: i64) -> Self {
        Self {
            code: Self::generate_otp(),
            expires_at: Utc::now() + Duration::minutes(ttl_minutes),
        }
    }

    /// Creates an opaque token challenge for the email channel
    pub fn new_token(ttl_minutes: i64) -> Self {
        Self {
            code: Uuid::new_v4().to_string(),
            expires_at: Utc::now() + Duration::minutes(ttl_minutes),
        }
    }

    /// Generates a uniformly random fixed-width numeric code from the OS CSPRNG
    fn generate_otp() -> String {
        let mut rng = OsRng;
        // Rejection sampling keeps the distribution over [0, 1_000_000) uniform
        let bound = u32::MAX - (u32::MAX % 1_000_000);
        let num = loop {
            let mut bytes = [0u8; 4];
            rng.fill_bytes(&mut bytes);
            let candidate = u32::from_le_bytes(bytes);
            if candidate < bound {
                break candidate % 1_000_000;
            }
        };
        format!("{:06}", num)
    }

    /// Checks whether the challenge has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compares a submitted code against this challenge in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Time remaining until expiry, or zero if already expired
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn otp_is_fixed_width_numeric() {
        for _ in 0..100 {
            let challenge = RecoveryChallenge::new_otp(DEFAULT_TTL_MINUTES);
            assert_eq!(challenge.code.len(), OTP_LENGTH);
            assert!(challenge.code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn otp_values_vary() {
        let codes: HashSet<String> = (0..100)
            .map(|_| RecoveryChallenge::new_otp(DEFAULT_TTL_MINUTES).code)
            .collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn token_is_parseable_uuid() {
        let challenge = RecoveryChallenge::new_token(DEFAULT_TTL_MINUTES);
        assert!(Uuid::parse_str(&challenge.code).is_ok());
    }

    #[test]
    fn expiry_tracks_requested_ttl() {
        let challenge = RecoveryChallenge::new_otp(DEFAULT_TTL_MINUTES);
        let remaining = challenge.time_until_expiry();
        assert!(remaining <= Duration::minutes(DEFAULT_TTL_MINUTES));
        assert!(remaining > Duration::minutes(DEFAULT_TTL_MINUTES - 1));
    }

    #[test]
    fn zero_ttl_challenge_expires_immediately() {
        let challenge = RecoveryChallenge::new_otp(0);
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(challenge.is_expired());
        assert_eq!(challenge.time_until_expiry(), Duration::zero());
    }

    #[test]
    fn serialization_round_trip() {
        let challenge = RecoveryChallenge::new_otp(DEFAULT_TTL_MINUTES);
        let json = serde_json::to_string(&challenge).unwrap();
        let parsed: RecoveryChallenge = serde_json::from_str(&json).unwrap();
        assert_eq!(challenge, parsed);
    }

    #[test]
    fn matches_rejects_wrong_and_differently_sized_codes() {
        let challenge = RecoveryChallenge {
            code: "123456".to_string(),
            expires_at: Utc::now() + Duration::minutes(5),
        };
        assert!(challenge.matches("123456"));
        assert!(!challenge.matches("654321"));
        assert!(!challenge.matches("12345"));
        assert!(!challenge.matches("1234567"));
    }
}
