//! CPF (Cadastro de Pessoas Físicas) checksum and mask
//!
//! A CPF is 11 digits: a 9-digit base followed by two check digits. Each
//! check digit is a weighted sum of the digits before it, with weights
//! counting down to 2, reduced as `(sum * 10) mod 11` where 10 maps to 0.

use crate::digits::digit_values;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Digits in a CPF
pub const CPF_DIGITS: usize = 11;

/// Length of `XXX.XXX.XXX-XX`
pub const CPF_MASKED_LEN: usize = 14;

/// Check digit for `digits`, weights running from `digits.len() + 1` down to 2
#[allow(clippy::cast_possible_truncation)] // remainder is below 10
fn check_digit(digits: &[u8]) -> u8 {
    let weight_start = digits.len() + 1;
    let sum: usize = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| usize::from(d) * (weight_start - i))
        .sum();

    // 11 is unreachable mod 11, so only 10 collapses to 0
    match (sum * 10) % 11 {
        10 => 0,
        r => r as u8,
    }
}

/// Both check digits for a 9-digit base
///
/// ```
/// use resgate_validation::cpf::check_digits;
///
/// assert_eq!(check_digits([5, 2, 9, 9, 8, 2, 2, 4, 7]), [2, 5]);
/// ```
#[must_use]
pub fn check_digits(base: [u8; 9]) -> [u8; 2] {
    let first = check_digit(&base);
    let mut with_first = [0_u8; 10];
    with_first[..9].copy_from_slice(&base);
    with_first[9] = first;
    [first, check_digit(&with_first)]
}

/// Run every CPF rule against `input`
fn check(input: &str) -> Result<[u8; CPF_DIGITS], ValidationError> {
    let values = digit_values(input, usize::MAX);
    let digits: [u8; CPF_DIGITS] = values
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::CpfLength {
            found: values.len(),
        })?;

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(ValidationError::CpfRepeatedDigits);
    }

    let mut base = [0_u8; 9];
    base.copy_from_slice(&digits[..9]);
    let [first, second] = check_digits(base);

    if first != digits[9] {
        return Err(ValidationError::CpfCheckDigit { position: 9 });
    }
    if second != digits[10] {
        return Err(ValidationError::CpfCheckDigit { position: 10 });
    }

    Ok(digits)
}

/// Validate a CPF, ignoring any mask characters
///
/// True only for exactly 11 digits, not all identical, with both check
/// digits correct.
#[must_use]
pub fn validate_cpf(input: &str) -> bool {
    check(input).is_ok()
}

/// Apply the `XXX.XXX.XXX-XX` mask to whatever digits `input` holds
///
/// Separators appear only once a digit follows them, so the mask grows
/// keystroke by keystroke: `"1234"` → `"123.4"`. Digits past the eleventh
/// are dropped. Formatting an already masked value returns it unchanged.
#[must_use]
pub fn format_cpf(input: &str) -> String {
    let digits = digit_values(input, CPF_DIGITS);
    let mut out = String::with_capacity(CPF_MASKED_LEN);

    for (i, d) in digits.into_iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {},
        }
        out.push(char::from(b'0' + d));
    }

    out
}

/// A CPF known to pass every checksum rule
///
/// Stored as its 11 digits; serialized as the digit string the backend
/// expects and displayed with the mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parse a CPF, masked or not
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks: length, repeated digits, or
    /// a check digit mismatch.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = check(input)?;
        Ok(Self(digits.iter().map(|&d| char::from(b'0' + d)).collect()))
    }

    /// The 11 digits without mask
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The masked form `XXX.XXX.XXX-XX`
    #[must_use]
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }
}

impl TryFrom<String> for Cpf {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
