//! Value objects used across the domain layer.

pub mod grant;
pub mod identifier;

// Re-export commonly used types
pub use grant::LoginGrant;
pub use identifier::{Channel, Identifier};
