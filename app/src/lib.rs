//! # Resgate
//!
//! Ticket redemption client built on the reducer architecture.
//!
//! Each screen is a [`Reducer`](resgate_core::reducer::Reducer):
//!
//! - [`redemption`]: attendee data entry with live CPF/phone masks
//! - [`registration`]: account creation with a delayed redirect
//! - [`login`]: email-or-username sign in
//! - [`confirmation`]: the issued ticket, with event details
//!
//! Backend calls go through the [`api::TicketApi`] trait, injected via
//! [`environment::FormEnvironment`]. [`mocks::InMemoryTicketApi`] is an
//! in-memory backend for the demo binary and tests.

pub mod api;
pub mod config;
pub mod confirmation;
pub mod environment;
pub mod fields;
pub mod login;
pub mod mocks;
pub mod redemption;
pub mod registration;
pub mod types;

pub use api::{ApiError, TicketApi};
pub use config::{Config, EventDetails, FormRules};
pub use confirmation::{ConfirmationAction, ConfirmationReducer, ConfirmationState, TicketView};
pub use environment::FormEnvironment;
pub use login::{LoginAction, LoginField, LoginReducer, LoginState};
pub use redemption::{RedemptionAction, RedemptionField, RedemptionReducer, RedemptionState};
pub use registration::{
    RegistrationAction, RegistrationField, RegistrationReducer, RegistrationState,
};
pub use types::{Session, Ticket, User};
