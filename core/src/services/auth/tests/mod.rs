//! Tests for signup and login
