//! Permissive email syntax check
//!
//! Accepts `local@domain.tld` where no part contains whitespace or `@`.
//! Whitespace includes the byte order mark (U+FEFF), which Unicode does not
//! classify as `White_Space` but browsers' `\s` does.
//! This is not RFC 5322; the backend owns real deliverability checks.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("hardcoded email pattern should compile")
});

/// Whether `input` looks like `local@domain.tld`
///
/// The input is matched as given; surrounding whitespace makes it invalid.
#[must_use]
pub fn validate_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

/// An email address that passed [`validate_email`] after trimming
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Trim and validate an email address
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmailFormat`] if the trimmed input does not
    /// match `local@domain.tld`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if validate_email(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::EmailFormat)
        }
    }

    /// The address as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
