//! Mail gateway implementations
//!
//! Implementations of the core `MailGateway` trait:
//! - Mailgun Messages API over HTTPS for production delivery
//! - a console mock for development and tests

pub mod mailgun;
pub mod mock;

pub use mailgun::{MailgunConfig, MailgunMailClient};
pub use mock::MockMailClient;
