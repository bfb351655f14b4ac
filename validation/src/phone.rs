//! Brazilian phone numbers: two-digit area code plus 8 (landline) or 9
//! (mobile) digits

use crate::digits::{digit_values, strip_digits};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most digits a phone number can hold
pub const PHONE_MAX_DIGITS: usize = 11;

/// Length of `(DD) DDDDD-DDDD`
pub const PHONE_MASKED_MAX_LEN: usize = 15;

const AREA_CODE_DIGITS: usize = 2;

/// Valid iff the stripped input has 10 or 11 digits
#[must_use]
pub fn validate_phone(input: &str) -> bool {
    matches!(strip_digits(input).len(), 10 | 11)
}

/// Apply the phone mask to whatever digits `input` holds
///
/// Up to 10 digits follow `(DD) DDDD-DDDD`; exactly 11 follow
/// `(DD) DDDDD-DDDD`. Partial input renders the reachable prefix: the area
/// code is wrapped only once a third digit arrives and the hyphen only once a
/// digit follows the first group. Digits past the eleventh are dropped.
#[must_use]
pub fn format_phone(input: &str) -> String {
    let digits = digit_values(input, PHONE_MAX_DIGITS);
    let mut out = String::with_capacity(PHONE_MASKED_MAX_LEN);
    let push = |out: &mut String, run: &[u8]| {
        out.extend(run.iter().map(|&d| char::from(b'0' + d)));
    };

    if digits.len() <= AREA_CODE_DIGITS {
        push(&mut out, &digits);
        return out;
    }

    let (area, subscriber) = digits.split_at(AREA_CODE_DIGITS);
    let group = if digits.len() == PHONE_MAX_DIGITS { 5 } else { 4 };

    out.push('(');
    push(&mut out, area);
    out.push_str(") ");

    if subscriber.len() > group {
        let (head, tail) = subscriber.split_at(group);
        push(&mut out, head);
        out.push('-');
        push(&mut out, tail);
    } else {
        push(&mut out, subscriber);
    }

    out
}

/// A phone number with 10 or 11 digits
///
/// Serialized as bare digits, displayed with the mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Parse a phone number, masked or not
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PhoneLength`] unless 10 or 11 digits remain
    /// after stripping.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = strip_digits(input);
        match digits.len() {
            10 | 11 => Ok(Self(digits)),
            found => Err(ValidationError::PhoneLength { found }),
        }
    }

    /// The digits without mask
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Two-digit area code (DDD)
    #[must_use]
    pub fn area_code(&self) -> &str {
        &self.0[..AREA_CODE_DIGITS]
    }

    /// Whether this is an 11-digit (mobile) number
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.0.len() == PHONE_MAX_DIGITS
    }

    /// The masked form
    #[must_use]
    pub fn formatted(&self) -> String {
        format_phone(&self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
