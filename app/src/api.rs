//! Backend API seam.
//!
//! Reducers never talk HTTP. They call a [`TicketApi`] from their
//! environment inside an `Effect::Future`, so the transport can be swapped
//! for [`crate::mocks::InMemoryTicketApi`] in tests and demos.

use crate::types::{ErrorBody, LoginRequest, RedemptionRequest, RegisterRequest, Session, Ticket};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Message shown when the backend could not be reached
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão. Tente novamente.";

/// Backend call result
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future returned by [`TicketApi`] methods
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send>>;

/// Backend call failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error body, if the backend sent one
        body: ErrorBody,
    },

    /// The request never got an answer
    #[error("connection failed: {0}")]
    Connection(String),
}

impl ApiError {
    /// Rejection carrying a backend message
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: ErrorBody {
                message: Some(message.into()),
            },
        }
    }

    /// Text to show the user
    ///
    /// Prefers the backend's message, then `fallback` for rejections without
    /// one, and the fixed connection message for transport failures.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { body, .. } => body
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string(),
            Self::Connection(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Ticket backend operations
pub trait TicketApi: Send + Sync {
    /// Redeem a ticket for an attendee
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the redemption
    /// and [`ApiError::Connection`] when it cannot be reached.
    fn redeem_ticket(&self, request: RedemptionRequest) -> ApiFuture<Ticket>;

    /// Create an account
    ///
    /// # Errors
    ///
    /// Same as [`TicketApi::redeem_ticket`].
    fn register(&self, request: RegisterRequest) -> ApiFuture<Session>;

    /// Authenticate an existing account
    ///
    /// # Errors
    ///
    /// Same as [`TicketApi::redeem_ticket`].
    fn login(&self, request: LoginRequest) -> ApiFuture<Session>;
}
