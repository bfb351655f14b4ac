//! Login form.

use crate::config::FormRules;
use crate::environment::FormEnvironment;
use crate::fields::FieldErrors;
use crate::types::{LoginRequest, Session};
use resgate_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Shown when a rejection carries no message
pub const LOGIN_FALLBACK_MESSAGE: &str = "Erro ao fazer login";

/// Login form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    /// Email or username
    Login,
    /// Password
    Password,
}

/// Login form state
#[derive(Clone, Debug, Default)]
pub struct LoginState {
    /// Email or username as typed
    pub login: String,
    /// Password
    pub password: String,
    /// Password shown in clear text
    pub show_password: bool,
    /// Per-field validation messages
    pub errors: FieldErrors<LoginField>,
    /// Backend or connection failure from the last submit
    pub login_error: Option<String>,
    /// A request is in flight
    pub is_loading: bool,
    /// Authenticated session
    pub session: Option<Session>,
    /// Login succeeded
    pub completed: bool,
}

/// Login form actions
#[derive(Clone, Debug)]
pub enum LoginAction {
    /// The user edited a field
    FieldChanged {
        /// Edited field
        field: LoginField,
        /// New value
        value: String,
    },
    /// Show or hide the password
    TogglePasswordVisibility,
    /// The user pressed the submit button
    Submit,
    /// The backend accepted the credentials
    LoggedIn {
        /// Authenticated session
        session: Session,
    },
    /// The backend refused the credentials or could not be reached
    LoginFailed {
        /// Message to show above the form
        message: String,
    },
}

/// Validate both fields
#[must_use]
pub fn validate(state: &LoginState, rules: &FormRules) -> FieldErrors<LoginField> {
    let mut errors = FieldErrors::new();

    if state.login.trim().is_empty() {
        errors.set(LoginField::Login, "Email ou nome de usuário é obrigatório");
    }

    if state.password.is_empty() {
        errors.set(LoginField::Password, "Senha é obrigatória");
    } else if state.password.chars().count() < rules.min_password_len {
        errors.set(
            LoginField::Password,
            format!(
                "Senha deve ter pelo menos {} caracteres",
                rules.min_password_len
            ),
        );
    }

    errors
}

/// Reducer for the login form
#[derive(Clone, Debug, Default)]
pub struct LoginReducer;

impl LoginReducer {
    /// Create a new login reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for LoginReducer {
    type State = LoginState;
    type Action = LoginAction;
    type Environment = FormEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LoginAction::FieldChanged { field, value } => {
                match field {
                    LoginField::Login => state.login = value,
                    LoginField::Password => state.password = value,
                }
                state.errors.clear(field);
                state.login_error = None;
                smallvec![Effect::None]
            },

            LoginAction::TogglePasswordVisibility => {
                state.show_password = !state.show_password;
                smallvec![Effect::None]
            },

            LoginAction::Submit => {
                if state.is_loading {
                    return smallvec![Effect::None];
                }

                state.errors = validate(state, &env.rules);
                if !state.errors.is_empty() {
                    return smallvec![Effect::None];
                }

                state.is_loading = true;
                state.login_error = None;

                let request = LoginRequest {
                    login: state.login.clone(),
                    password: state.password.clone(),
                };
                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.login(request).await {
                        Ok(session) => Some(LoginAction::LoggedIn { session }),
                        Err(error) => {
                            tracing::warn!(%error, "Login failed");
                            Some(LoginAction::LoginFailed {
                                message: error.user_message(LOGIN_FALLBACK_MESSAGE),
                            })
                        },
                    }
                }))]
            },

            LoginAction::LoggedIn { session } => {
                tracing::info!(username = %session.user.username, "Logged in");
                state.is_loading = false;
                state.session = Some(session);
                state.completed = true;
                smallvec![Effect::None]
            },

            LoginAction::LoginFailed { message } => {
                state.is_loading = false;
                state.login_error = Some(message);
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::InMemoryTicketApi;
    use crate::types::User;
    use resgate_testing::{ReducerTest, assertions, test_clock};
    use std::sync::Arc;

    fn env() -> FormEnvironment {
        FormEnvironment::new(InMemoryTicketApi::default().shared(), Arc::new(test_clock()))
    }

    fn typed(field: LoginField, value: &str) -> LoginAction {
        LoginAction::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_empty_submit() {
        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState::default())
            .given_actions(vec![typed(LoginField::Login, "   ")])
            .when_action(LoginAction::Submit)
            .then_state(|state| {
                assert_eq!(
                    state.errors.get(LoginField::Login),
                    Some("Email ou nome de usuário é obrigatório")
                );
                assert_eq!(state.errors.get(LoginField::Password), Some("Senha é obrigatória"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_short_password() {
        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState::default())
            .given_actions(vec![
                typed(LoginField::Login, "maria"),
                typed(LoginField::Password, "123"),
            ])
            .when_action(LoginAction::Submit)
            .then_state(|state| {
                assert_eq!(
                    state.errors.get(LoginField::Password),
                    Some("Senha deve ter pelo menos 6 caracteres")
                );
                assert!(!state.errors.contains(LoginField::Login));
            })
            .run();
    }

    #[test]
    fn test_valid_submit_starts_request() {
        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState {
                login_error: Some("Credenciais inválidas".to_string()),
                ..LoginState::default()
            })
            .given_actions(vec![
                typed(LoginField::Login, "maria@example.com"),
                typed(LoginField::Password, "segredo1"),
            ])
            .when_action(LoginAction::Submit)
            .then_state(|state| {
                assert!(state.is_loading);
                assert!(state.login_error.is_none());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_logged_in_completes() {
        let session = Session {
            user: User {
                id: "1".to_string(),
                username: "maria".to_string(),
                email: "maria@example.com".to_string(),
            },
            token: "token".to_string(),
        };

        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState {
                is_loading: true,
                ..LoginState::default()
            })
            .when_action(LoginAction::LoggedIn { session })
            .then_state(|state| {
                assert!(state.completed);
                assert!(!state.is_loading);
                assert_eq!(state.session.as_ref().map(|s| s.token.as_str()), Some("token"));
            })
            .run();
    }

    #[test]
    fn test_failure_then_edit_clears_error() {
        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState::default())
            .given_actions(vec![LoginAction::LoginFailed {
                message: "Credenciais inválidas".to_string(),
            }])
            .when_action(typed(LoginField::Password, "x"))
            .then_state(|state| assert!(state.login_error.is_none()))
            .run();
    }

    #[test]
    fn test_toggle_password_visibility() {
        ReducerTest::new(LoginReducer::new())
            .with_env(env())
            .given_state(LoginState::default())
            .given_actions(vec![LoginAction::TogglePasswordVisibility])
            .when_action(LoginAction::TogglePasswordVisibility)
            .then_state(|state| assert!(!state.show_password))
            .run();
    }
}
