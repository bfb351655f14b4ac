//! # Resgate Validation
//!
//! Field validation and input masks for the ticket redemption forms.
//!
//! Everything here is a pure, total function over user input: validators
//! answer `true`/`false`, formatters return the best mask reachable with the
//! digits available. Nothing panics and nothing allocates beyond the result.
//!
//! | Field    | Validator        | Formatter      | Canonical form  |
//! |----------|------------------|----------------|-----------------|
//! | CPF      | [`validate_cpf`] | [`format_cpf`] | 11 digits       |
//! | Phone    | [`validate_phone`] | [`format_phone`] | 10 or 11 digits |
//! | Email    | [`validate_email`] | none         | trimmed text    |
//!
//! For values that must be valid by construction use the typed wrappers
//! [`Cpf`], [`Phone`] and [`Email`], whose `parse` constructors report why
//! input was rejected.
//!
//! ```
//! use resgate_validation::{format_cpf, format_phone, validate_cpf};
//!
//! assert_eq!(format_cpf("52998224725"), "529.982.247-25");
//! assert!(validate_cpf("529.982.247-25"));
//! assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
//! ```

pub mod cpf;
pub mod digits;
pub mod email;
pub mod error;
pub mod phone;

pub use cpf::{Cpf, format_cpf, validate_cpf};
pub use digits::strip_digits;
pub use email::{Email, validate_email};
pub use error::ValidationError;
pub use phone::{Phone, format_phone, validate_phone};
