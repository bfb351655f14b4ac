//! Account registration form.
//!
//! A successful registration shows a confirmation message, then waits
//! [`FormRules::redirect_delay`](crate::config::FormRules::redirect_delay)
//! before marking the form completed.

use crate::config::FormRules;
use crate::environment::FormEnvironment;
use crate::fields::FieldErrors;
use crate::types::{RegisterRequest, Session};
use resgate_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use resgate_validation::validate_email;

/// Shown when a rejection carries no message
pub const REGISTER_FALLBACK_MESSAGE: &str = "Erro ao fazer cadastro";

/// Shown once the account exists
pub const REGISTER_SUCCESS_MESSAGE: &str = "Cadastro realizado com sucesso!";

/// Registration form fields, in screen order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    /// Username
    Username,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
}

/// Registration form state
#[derive(Clone, Debug, Default)]
pub struct RegistrationState {
    /// Username as typed
    pub username: String,
    /// Email as typed
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirm_password: String,
    /// Password shown in clear text
    pub show_password: bool,
    /// Confirmation shown in clear text
    pub show_confirm_password: bool,
    /// Per-field validation messages
    pub errors: FieldErrors<RegistrationField>,
    /// Backend or connection failure from the last submit
    pub register_error: Option<String>,
    /// Success banner
    pub success_message: Option<String>,
    /// A request is in flight
    pub is_loading: bool,
    /// Session of the new account
    pub session: Option<Session>,
    /// The redirect delay elapsed after success
    pub completed: bool,
}

/// Registration form actions
#[derive(Clone, Debug)]
pub enum RegistrationAction {
    /// The user edited a field
    FieldChanged {
        /// Edited field
        field: RegistrationField,
        /// New value
        value: String,
    },
    /// Show or hide the password
    TogglePasswordVisibility,
    /// Show or hide the confirmation
    ToggleConfirmPasswordVisibility,
    /// The user pressed the submit button
    Submit,
    /// The backend created the account
    Registered {
        /// Session for the new account
        session: Session,
    },
    /// The backend refused the registration or could not be reached
    RegistrationFailed {
        /// Message to show above the form
        message: String,
    },
    /// The post-success delay is over
    RedirectElapsed,
}

/// Validate every field, returning one message per failing field
#[must_use]
pub fn validate(state: &RegistrationState, rules: &FormRules) -> FieldErrors<RegistrationField> {
    let mut errors = FieldErrors::new();

    let username = state.username.trim();
    if username.is_empty() {
        errors.set(RegistrationField::Username, "Nome de usuário é obrigatório");
    } else if username.chars().count() < rules.min_username_len {
        errors.set(
            RegistrationField::Username,
            format!(
                "Nome de usuário deve ter pelo menos {} caracteres",
                rules.min_username_len
            ),
        );
    }

    if state.email.trim().is_empty() {
        errors.set(RegistrationField::Email, "Email é obrigatório");
    } else if !validate_email(&state.email) {
        errors.set(RegistrationField::Email, "Email deve ter um formato válido");
    }

    if state.password.is_empty() {
        errors.set(RegistrationField::Password, "Senha é obrigatória");
    } else if state.password.chars().count() < rules.min_password_len {
        errors.set(
            RegistrationField::Password,
            format!(
                "Senha deve ter pelo menos {} caracteres",
                rules.min_password_len
            ),
        );
    }

    if state.confirm_password.is_empty() {
        errors.set(
            RegistrationField::ConfirmPassword,
            "Confirmação de senha é obrigatória",
        );
    } else if state.password != state.confirm_password {
        errors.set(RegistrationField::ConfirmPassword, "Senhas não coincidem");
    }

    errors
}

/// Reducer for the registration form
#[derive(Clone, Debug, Default)]
pub struct RegistrationReducer;

impl RegistrationReducer {
    /// Create a new registration reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RegistrationReducer {
    type State = RegistrationState;
    type Action = RegistrationAction;
    type Environment = FormEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RegistrationAction::FieldChanged { field, value } => {
                match field {
                    RegistrationField::Username => state.username = value,
                    RegistrationField::Email => state.email = value,
                    RegistrationField::Password => state.password = value,
                    RegistrationField::ConfirmPassword => state.confirm_password = value,
                }
                state.errors.clear(field);
                state.register_error = None;
                state.success_message = None;
                smallvec![Effect::None]
            },

            RegistrationAction::TogglePasswordVisibility => {
                state.show_password = !state.show_password;
                smallvec![Effect::None]
            },

            RegistrationAction::ToggleConfirmPasswordVisibility => {
                state.show_confirm_password = !state.show_confirm_password;
                smallvec![Effect::None]
            },

            RegistrationAction::Submit => {
                if state.is_loading {
                    return smallvec![Effect::None];
                }

                state.errors = validate(state, &env.rules);
                if !state.errors.is_empty() {
                    return smallvec![Effect::None];
                }

                state.is_loading = true;
                state.register_error = None;
                state.success_message = None;

                let request = RegisterRequest {
                    username: state.username.clone(),
                    email: state.email.clone(),
                    password: state.password.clone(),
                };
                let api = env.api.clone();

                tracing::info!(username = %request.username, "Registering account");

                smallvec![Effect::Future(Box::pin(async move {
                    match api.register(request).await {
                        Ok(session) => Some(RegistrationAction::Registered { session }),
                        Err(error) => {
                            tracing::warn!(%error, "Registration failed");
                            Some(RegistrationAction::RegistrationFailed {
                                message: error.user_message(REGISTER_FALLBACK_MESSAGE),
                            })
                        },
                    }
                }))]
            },

            RegistrationAction::Registered { session } => {
                tracing::info!(username = %session.user.username, "Account registered");
                state.is_loading = false;
                state.session = Some(session);
                state.success_message = Some(REGISTER_SUCCESS_MESSAGE.to_string());
                smallvec![Effect::delay(
                    env.rules.redirect_delay(),
                    RegistrationAction::RedirectElapsed
                )]
            },

            RegistrationAction::RegistrationFailed { message } => {
                state.is_loading = false;
                state.register_error = Some(message);
                smallvec![Effect::None]
            },

            RegistrationAction::RedirectElapsed => {
                state.completed = state.session.is_some();
                smallvec![Effect::None]
            },
        }
    }
}
