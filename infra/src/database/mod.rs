//! Database module - MySQL implementations using SQLx
//!
//! Provides connection pool management and the repository implementation
//! backing the account store.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlAccountRepository;
