//! Signup and login services.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, Signup};
