//! Identity-key value object.
//!
//! An account is looked up either by email address or by phone number. The
//! raw string from a request is resolved into a tagged variant exactly once at
//! the boundary; everything downstream dispatches on the variant instead of
//! inspecting strings.

use serde::{Deserialize, Serialize};

use ro_shared::utils::validation::{is_valid_email, is_valid_phone};

use crate::errors::ValidationError;

/// The notification/verification channel an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Phone,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Phone => write!(f, "phone"),
        }
    }
}

/// An account identity key: an email address or an E.164 phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    /// Resolves a raw identifier string into its tagged variant.
    ///
    /// A value containing `@` is treated as an email address, anything else
    /// as a phone number; each is then validated for its shape.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "identifier".to_string(),
            });
        }

        if trimmed.contains('@') {
            if !is_valid_email(trimmed) {
                return Err(ValidationError::InvalidEmail);
            }
            Ok(Identifier::Email(trimmed.to_string()))
        } else {
            if !is_valid_phone(trimmed) {
                return Err(ValidationError::InvalidPhoneFormat {
                    phone: mask_phone(trimmed),
                });
            }
            Ok(Identifier::Phone(trimmed.to_string()))
        }
    }

    /// The channel this identifier addresses
    pub fn channel(&self) -> Channel {
        match self {
            Identifier::Email(_) => Channel::Email,
            Identifier::Phone(_) => Channel::Phone,
        }
    }

    /// The raw identity-key value
    pub fn value(&self) -> &str {
        match self {
            Identifier::Email(v) | Identifier::Phone(v) => v,
        }
    }

    /// A masked rendering safe for logs
    pub fn masked(&self) -> String {
        match self {
            Identifier::Email(email) => mask_email(email),
            Identifier::Phone(phone) => mask_phone(phone),
        }
    }
}

/// Masks an email address, keeping the first character and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", head, domain)
        }
        None => "***".to_string(),
    }
}

/// Masks a phone number, keeping only the last four digits.
///
/// Operates on characters, not bytes: the input may be arbitrary user text
/// that failed validation.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(chars.len() - 5), tail)
    } else {
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}
