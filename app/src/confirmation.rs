//! Ticket confirmation screen.

use crate::config::EventDetails;
use crate::types::Ticket;
use resgate_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::fmt;

/// Headline above the ticket
pub const CONFIRMATION_HEADLINE: &str = "Ingresso Resgatado com Sucesso!";

/// Instructions printed on every ticket
pub const ATTENDEE_INSTRUCTIONS: [&str; 4] = [
    "Apresente este ingresso na entrada do evento",
    "Chegue com 30 minutos de antecedência",
    "Traga um documento de identificação",
    "O ingresso é pessoal e intransferível",
];

/// Footer printed under the ticket
pub const TICKET_FOOTER: &str = "Ingresso válido apenas para a data especificada";

/// Everything the confirmation screen renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketView {
    /// Event the ticket is for
    pub event: EventDetails,
    /// Redeemed ticket
    pub ticket: Ticket,
    /// Attendee instructions
    pub instructions: &'static [&'static str],
}

impl TicketView {
    /// Combine a ticket with the event it admits to
    #[must_use]
    pub const fn new(event: EventDetails, ticket: Ticket) -> Self {
        Self {
            event,
            ticket,
            instructions: &ATTENDEE_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for TicketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{CONFIRMATION_HEADLINE}")?;
        writeln!(f)?;
        writeln!(f, "{}  [{}]", self.event.title, self.ticket.number)?;
        writeln!(f, "{}", self.event.subtitle)?;
        writeln!(f)?;
        writeln!(f, "Data:     {}", self.event.date)?;
        writeln!(f, "Horário:  {}", self.event.time)?;
        writeln!(f, "Local:    {}", self.event.venue)?;
        writeln!(f)?;
        writeln!(f, "Nome:     {}", self.ticket.name)?;
        writeln!(f, "Email:    {}", self.ticket.email)?;
        writeln!(f, "Telefone: {}", self.ticket.phone)?;
        writeln!(f, "CPF:      {}", self.ticket.cpf_formatted)?;
        writeln!(f)?;
        for line in self.instructions {
            writeln!(f, "• {line}")?;
        }
        writeln!(f)?;
        write!(f, "{TICKET_FOOTER}")
    }
}

/// Confirmation screen state
#[derive(Clone, Debug, Default)]
pub struct ConfirmationState {
    /// Ticket being shown, if any
    pub view: Option<TicketView>,
}

/// Confirmation screen actions
#[derive(Clone, Debug)]
pub enum ConfirmationAction {
    /// Show a freshly redeemed ticket
    Show {
        /// Ticket to show
        ticket: Ticket,
    },
    /// The attendee left the screen
    Dismiss,
}

/// Reducer for the confirmation screen
#[derive(Clone, Debug, Default)]
pub struct ConfirmationReducer;

impl ConfirmationReducer {
    /// Create a new confirmation reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ConfirmationReducer {
    type State = ConfirmationState;
    type Action = ConfirmationAction;
    type Environment = EventDetails;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ConfirmationAction::Show { ticket } => {
                state.view = Some(TicketView::new(env.clone(), ticket));
            },
            ConfirmationAction::Dismiss => state.view = None,
        }
        smallvec![Effect::None]
    }
}
