//! # RealOne Shared
//!
//! Configuration, response envelopes, and validation utilities shared by the
//! RealOne backend crates.

pub mod config;
pub mod types;
pub mod utils;
