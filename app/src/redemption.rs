//! Ticket redemption form.
//!
//! CPF and phone inputs are re-masked on every change, so the state always
//! holds what the user sees. Submitting validates every field in screen
//! order and, when clean, calls [`crate::api::TicketApi::redeem_ticket`]
//! with bare digits.

use crate::config::FormRules;
use crate::environment::FormEnvironment;
use crate::fields::FieldErrors;
use crate::types::{RedemptionRequest, Ticket};
use resgate_core::{DateTime, SmallVec, Utc, effect::Effect, reducer::Reducer, smallvec};
use resgate_validation::{
    format_cpf, format_phone, strip_digits, validate_cpf, validate_email, validate_phone,
};

/// Shown when a rejection carries no message
pub const REDEEM_FALLBACK_MESSAGE: &str = "Erro ao resgatar ingresso";

/// Redemption form fields, in screen order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RedemptionField {
    /// Attendee name
    Name,
    /// Attendee email
    Email,
    /// CPF, masked as typed
    Cpf,
    /// Phone, masked as typed
    Phone,
    /// Event code
    EventCode,
}

/// Redemption form state
#[derive(Clone, Debug, Default)]
pub struct RedemptionState {
    /// Name as typed
    pub name: String,
    /// Email as typed
    pub email: String,
    /// Masked CPF
    pub cpf: String,
    /// Masked phone
    pub phone: String,
    /// Upper-cased event code
    pub event_code: String,
    /// Per-field validation messages
    pub errors: FieldErrors<RedemptionField>,
    /// Backend or connection failure from the last submit
    pub submit_error: Option<String>,
    /// A request is in flight
    pub is_loading: bool,
    /// Ticket issued by the last successful submit
    pub ticket: Option<Ticket>,
    /// When the ticket was received
    pub redeemed_at: Option<DateTime<Utc>>,
}

impl RedemptionState {
    /// Current value of `field`
    #[must_use]
    pub fn value(&self, field: RedemptionField) -> &str {
        match field {
            RedemptionField::Name => &self.name,
            RedemptionField::Email => &self.email,
            RedemptionField::Cpf => &self.cpf,
            RedemptionField::Phone => &self.phone,
            RedemptionField::EventCode => &self.event_code,
        }
    }

    /// Request body for the current values
    ///
    /// Text is trimmed and CPF/phone are reduced to digits.
    #[must_use]
    pub fn to_request(&self) -> RedemptionRequest {
        RedemptionRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            cpf: strip_digits(&self.cpf),
            phone: strip_digits(&self.phone),
            event_code: self.event_code.trim().to_string(),
        }
    }
}

/// Redemption form actions
#[derive(Clone, Debug)]
pub enum RedemptionAction {
    /// The user edited a field
    FieldChanged {
        /// Edited field
        field: RedemptionField,
        /// Raw input value
        value: String,
    },
    /// The user pressed the submit button
    Submit,
    /// The backend issued a ticket
    TicketRedeemed {
        /// Issued ticket
        ticket: Ticket,
    },
    /// The backend refused the redemption or could not be reached
    RedemptionFailed {
        /// Message to show above the form
        message: String,
    },
    /// Clear the form; ignored while a request is in flight
    Reset,
}

/// Validate every field, returning one message per failing field
#[must_use]
pub fn validate(state: &RedemptionState, rules: &FormRules) -> FieldErrors<RedemptionField> {
    let mut errors = FieldErrors::new();

    let name = state.name.trim();
    if name.is_empty() {
        errors.set(RedemptionField::Name, "Nome é obrigatório");
    } else if name.chars().count() < rules.min_name_len {
        errors.set(
            RedemptionField::Name,
            format!("Nome deve ter pelo menos {} caracteres", rules.min_name_len),
        );
    }

    if state.email.trim().is_empty() {
        errors.set(RedemptionField::Email, "Email é obrigatório");
    } else if !validate_email(&state.email) {
        errors.set(RedemptionField::Email, "Email inválido");
    }

    if state.cpf.trim().is_empty() {
        errors.set(RedemptionField::Cpf, "CPF é obrigatório");
    } else if !validate_cpf(&state.cpf) {
        errors.set(RedemptionField::Cpf, "CPF inválido");
    }

    if state.phone.trim().is_empty() {
        errors.set(RedemptionField::Phone, "Telefone é obrigatório");
    } else if !validate_phone(&state.phone) {
        errors.set(RedemptionField::Phone, "Telefone inválido");
    }

    let code = state.event_code.trim();
    if code.is_empty() {
        errors.set(RedemptionField::EventCode, "Código do evento é obrigatório");
    } else if code.chars().count() < rules.min_event_code_len {
        errors.set(
            RedemptionField::EventCode,
            format!(
                "Código deve ter pelo menos {} caracteres",
                rules.min_event_code_len
            ),
        );
    }

    errors
}

/// Reducer for the redemption form
#[derive(Clone, Debug, Default)]
pub struct RedemptionReducer;

impl RedemptionReducer {
    /// Create a new redemption reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RedemptionReducer {
    type State = RedemptionState;
    type Action = RedemptionAction;
    type Environment = FormEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RedemptionAction::FieldChanged { field, value } => {
                let masked = match field {
                    RedemptionField::Cpf => format_cpf(&value),
                    RedemptionField::Phone => format_phone(&value),
                    RedemptionField::EventCode => value.to_uppercase(),
                    RedemptionField::Name | RedemptionField::Email => value,
                };
                match field {
                    RedemptionField::Name => state.name = masked,
                    RedemptionField::Email => state.email = masked,
                    RedemptionField::Cpf => state.cpf = masked,
                    RedemptionField::Phone => state.phone = masked,
                    RedemptionField::EventCode => state.event_code = masked,
                }
                state.errors.clear(field);
                smallvec![Effect::None]
            },

            RedemptionAction::Submit => {
                if state.is_loading {
                    tracing::debug!("Submit ignored while a redemption is in flight");
                    return smallvec![Effect::None];
                }

                state.submit_error = None;
                state.errors = validate(state, &env.rules);
                if !state.errors.is_empty() {
                    tracing::debug!(invalid_fields = state.errors.len(), "Redemption form invalid");
                    return smallvec![Effect::None];
                }

                state.is_loading = true;
                let request = state.to_request();
                let api = env.api.clone();

                tracing::info!(event_code = %request.event_code, "Redeeming ticket");

                smallvec![Effect::Future(Box::pin(async move {
                    match api.redeem_ticket(request).await {
                        Ok(ticket) => Some(RedemptionAction::TicketRedeemed { ticket }),
                        Err(error) => {
                            tracing::warn!(%error, "Ticket redemption failed");
                            Some(RedemptionAction::RedemptionFailed {
                                message: error.user_message(REDEEM_FALLBACK_MESSAGE),
                            })
                        },
                    }
                }))]
            },

            RedemptionAction::TicketRedeemed { ticket } => {
                tracing::info!(ticket = %ticket.number, "Ticket redeemed");
                state.is_loading = false;
                state.redeemed_at = Some(env.clock.now());
                state.ticket = Some(ticket);
                smallvec![Effect::None]
            },

            RedemptionAction::RedemptionFailed { message } => {
                state.is_loading = false;
                state.submit_error = Some(message);
                smallvec![Effect::None]
            },

            RedemptionAction::Reset => {
                if state.is_loading {
                    tracing::debug!("Reset ignored while a redemption is in flight");
                    return smallvec![Effect::None];
                }
                *state = RedemptionState::default();
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::InMemoryTicketApi;
    use resgate_core::environment::Clock;
    use resgate_testing::{ReducerTest, assertions, test_clock};
    use std::sync::Arc;

    fn env() -> FormEnvironment {
        FormEnvironment::new(
            InMemoryTicketApi::new(["EVENTO2025"]).shared(),
            Arc::new(test_clock()),
        )
    }

    fn typed(field: RedemptionField, value: &str) -> RedemptionAction {
        RedemptionAction::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    fn filled_form() -> Vec<RedemptionAction> {
        vec![
            typed(RedemptionField::Name, "Maria Silva"),
            typed(RedemptionField::Email, "maria@example.com"),
            typed(RedemptionField::Cpf, "52998224725"),
            typed(RedemptionField::Phone, "11987654321"),
            typed(RedemptionField::EventCode, "evento2025"),
        ]
    }

    fn ticket() -> Ticket {
        Ticket {
            number: "ING-000001".to_string(),
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            cpf_formatted: "529.982.247-25".to_string(),
        }
    }

    #[test]
    fn test_field_changes_apply_masks() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(filled_form())
            .when_action(typed(RedemptionField::Phone, "1133334444"))
            .then_state(|state| {
                assert_eq!(state.cpf, "529.982.247-25");
                assert_eq!(state.phone, "(11) 3333-4444");
                assert_eq!(state.event_code, "EVENTO2025");
                assert_eq!(state.name, "Maria Silva");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_empty_submit_reports_every_required_field() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .when_action(RedemptionAction::Submit)
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(
                    state.errors.iter().map(|(_, m)| m).collect::<Vec<_>>(),
                    vec![
                        "Nome é obrigatório",
                        "Email é obrigatório",
                        "CPF é obrigatório",
                        "Telefone é obrigatório",
                        "Código do evento é obrigatório",
                    ]
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_invalid_values_get_format_messages() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(vec![
                typed(RedemptionField::Name, " M "),
                typed(RedemptionField::Email, "maria@example"),
                typed(RedemptionField::Cpf, "12345678900"),
                typed(RedemptionField::Phone, "119876"),
                typed(RedemptionField::EventCode, "ev1"),
            ])
            .when_action(RedemptionAction::Submit)
            .then_state(|state| {
                let errors = &state.errors;
                assert_eq!(
                    errors.get(RedemptionField::Name),
                    Some("Nome deve ter pelo menos 2 caracteres")
                );
                assert_eq!(errors.get(RedemptionField::Email), Some("Email inválido"));
                assert_eq!(errors.get(RedemptionField::Cpf), Some("CPF inválido"));
                assert_eq!(errors.get(RedemptionField::Phone), Some("Telefone inválido"));
                assert_eq!(
                    errors.get(RedemptionField::EventCode),
                    Some("Código deve ter pelo menos 6 caracteres")
                );
            })
            .run();
    }

    #[test]
    fn test_editing_clears_only_that_fields_error() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(vec![RedemptionAction::Submit])
            .when_action(typed(RedemptionField::Cpf, "5"))
            .then_state(|state| {
                assert!(!state.errors.contains(RedemptionField::Cpf));
                assert_eq!(state.errors.len(), 4);
            })
            .run();
    }

    #[test]
    fn test_valid_submit_starts_request() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(filled_form())
            .when_action(RedemptionAction::Submit)
            .then_state(|state| {
                assert!(state.is_loading);
                assert!(state.errors.is_empty());
                assert_eq!(state.to_request().cpf, "52998224725");
                assert_eq!(state.to_request().phone, "11987654321");
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState {
                is_loading: true,
                submit_error: Some("stale".to_string()),
                ..RedemptionState::default()
            })
            .when_action(RedemptionAction::Submit)
            .then_state(|state| {
                assert!(state.is_loading);
                assert_eq!(state.submit_error.as_deref(), Some("stale"));
                assert!(state.errors.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_ticket_redeemed_records_time() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState {
                is_loading: true,
                ..RedemptionState::default()
            })
            .when_action(RedemptionAction::TicketRedeemed { ticket: ticket() })
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(state.ticket.as_ref().unwrap().number, "ING-000001");
                assert_eq!(state.redeemed_at, Some(test_clock().now()));
            })
            .run();
    }

    #[test]
    fn test_failure_shows_message() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState {
                is_loading: true,
                ..RedemptionState::default()
            })
            .when_action(RedemptionAction::RedemptionFailed {
                message: "Erro de conexão. Tente novamente.".to_string(),
            })
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(
                    state.submit_error.as_deref(),
                    Some("Erro de conexão. Tente novamente.")
                );
            })
            .run();
    }

    #[test]
    fn test_reset_clears_everything() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(filled_form())
            .given_actions(vec![RedemptionAction::TicketRedeemed { ticket: ticket() }])
            .when_action(RedemptionAction::Reset)
            .then_state(|state| {
                assert!(state.name.is_empty());
                assert!(state.ticket.is_none());
                assert!(state.redeemed_at.is_none());
            })
            .run();
    }

    #[test]
    fn test_reset_waits_for_pending_request() {
        ReducerTest::new(RedemptionReducer::new())
            .with_env(env())
            .given_state(RedemptionState::default())
            .given_actions(filled_form())
            .given_actions(vec![RedemptionAction::Submit])
            .when_action(RedemptionAction::Reset)
            .then_state(|state| {
                assert!(state.is_loading);
                assert_eq!(state.name, "Maria Silva");
                assert_eq!(state.cpf, "529.982.247-25");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_minimum_lengths_follow_rules() {
        let rules = FormRules {
            min_name_len: 5,
            ..FormRules::default()
        };
        let state = RedemptionState {
            name: "Ana".to_string(),
            ..RedemptionState::default()
        };

        assert_eq!(
            validate(&state, &rules).get(RedemptionField::Name),
            Some("Nome deve ter pelo menos 5 caracteres")
        );
    }
}
