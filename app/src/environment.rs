//! Injected dependencies for the form reducers.

use crate::api::TicketApi;
use crate::config::FormRules;
use resgate_core::environment::Clock;
use std::sync::Arc;

/// Environment shared by every form reducer
#[derive(Clone)]
pub struct FormEnvironment {
    /// Ticket backend
    pub api: Arc<dyn TicketApi>,
    /// Time source for redemption timestamps
    pub clock: Arc<dyn Clock>,
    /// Validation thresholds and timings
    pub rules: FormRules,
}

impl FormEnvironment {
    /// Create an environment with default [`FormRules`]
    #[must_use]
    pub fn new(api: Arc<dyn TicketApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            rules: FormRules::default(),
        }
    }

    /// Replace the validation rules
    #[must_use]
    pub fn with_rules(mut self, rules: FormRules) -> Self {
        self.rules = rules;
        self
    }
}

impl std::fmt::Debug for FormEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEnvironment")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
