//! Repository interfaces for data persistence.

pub mod account;

pub use account::{AccountRepository, MockAccountRepository};
