//! # Infrastructure Layer
//!
//! Concrete implementations behind the core abstractions: MySQL persistence
//! via SQLx, and the notification gateway clients (Twilio SMS, Mailgun email)
//! plus their mock counterparts for development and tests.

pub mod database;
pub mod mail;
pub mod sms;

use thiserror::Error;

/// Errors raised by infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS provider error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Mail provider error
    #[error("Mail service error: {0}")]
    Mail(String),
}
