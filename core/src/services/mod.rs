//! Business services containing domain logic and use cases.

pub mod auth;
pub mod gateway;
pub mod password;
pub mod recovery;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, Signup};
pub use gateway::{MailGateway, SmsGateway};
pub use recovery::{
    ChallengeIssued, ChallengePurpose, ChannelConfirmation, RecoveryConfig, RecoveryService,
};
pub use token::{AccessToken, Claims, TokenConfig, TokenService};
