//! Reasons a field value was rejected

use thiserror::Error;

/// Why a typed constructor rejected its input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// CPF did not have exactly 11 digits after stripping
    #[error("CPF must have 11 digits, found {found}")]
    CpfLength {
        /// Digit count after stripping
        found: usize,
    },

    /// All 11 digits are the same
    #[error("CPF cannot repeat a single digit")]
    CpfRepeatedDigits,

    /// A check digit did not match the weighted sum
    #[error("CPF check digit {position} does not match")]
    CpfCheckDigit {
        /// Zero-based index of the failing digit (9 or 10)
        position: usize,
    },

    /// Phone did not have 10 or 11 digits after stripping
    #[error("phone must have 10 or 11 digits, found {found}")]
    PhoneLength {
        /// Digit count after stripping
        found: usize,
    },

    /// Email did not match `local@domain.tld`
    #[error("email address is not well formed")]
    EmailFormat,
}
