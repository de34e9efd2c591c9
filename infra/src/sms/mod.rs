//! SMS gateway implementations
//!
//! Implementations of the core `SmsGateway` trait:
//! - Twilio Messages API over HTTPS for production delivery
//! - a console mock for development and tests

pub mod mock;
pub mod twilio;

pub use mock::MockSmsClient;
pub use twilio::{TwilioConfig, TwilioSmsClient};
