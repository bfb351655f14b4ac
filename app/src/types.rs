//! Wire types exchanged with the ticket backend.
//!
//! Field names follow the backend's JSON contract, so Portuguese keys are
//! mapped onto English Rust names with serde renames.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tickets
// ============================================================================

/// A redeemed ticket, as returned by the redemption endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket number printed on the confirmation
    #[serde(rename = "numeroIngresso")]
    pub number: String,
    /// Attendee name
    #[serde(rename = "nome")]
    pub name: String,
    /// Attendee email
    pub email: String,
    /// Attendee phone, as the backend chose to render it
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Masked CPF (`XXX.XXX.XXX-XX`)
    #[serde(rename = "cpfFormatado")]
    pub cpf_formatted: String,
}

/// Body of a ticket redemption request
///
/// CPF and phone travel as bare digits; text fields are trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRequest {
    /// Attendee name
    #[serde(rename = "nome")]
    pub name: String,
    /// Attendee email
    pub email: String,
    /// CPF digits
    pub cpf: String,
    /// Phone digits
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Event code, upper-cased
    #[serde(rename = "codigoEvento")]
    pub event_code: String,
}

// ============================================================================
// Accounts
// ============================================================================

/// Account returned by registration and login
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier
    #[serde(default)]
    pub id: String,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
}

/// Authenticated session: the user plus its bearer token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user
    pub user: User,
    /// Bearer token for later requests
    pub token: String,
}

/// Body of a registration request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Body of a login request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email or username
    pub login: String,
    /// Password
    pub password: String,
}

/// Error body returned with non-success responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    #[serde(default)]
    pub message: Option<String>,
}
