//! Redemption demo
//!
//! Types an attendee into the redemption form one keystroke at a time,
//! submits it against the in-memory backend and prints the ticket.

use resgate::mocks::InMemoryTicketApi;
use resgate::{
    Config, ConfirmationAction, ConfirmationReducer, ConfirmationState, FormEnvironment,
    RedemptionAction, RedemptionField, RedemptionReducer, RedemptionState,
};
use resgate_core::environment::SystemClock;
use resgate_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_EVENT_CODE: &str = "EVENTO2025";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Resgate de Ingresso ===\n");

    let api = InMemoryTicketApi::new([DEMO_EVENT_CODE]).with_latency(Duration::from_millis(100));
    let env = FormEnvironment::new(api.shared(), Arc::new(SystemClock))
        .with_rules(config.rules.clone());
    let store = Store::new(RedemptionState::default(), RedemptionReducer::new(), env);

    let attendee = [
        (RedemptionField::Name, "Maria Silva"),
        (RedemptionField::Email, "maria@example.com"),
        (RedemptionField::Cpf, "52998224725"),
        (RedemptionField::Phone, "11987654321"),
        (RedemptionField::EventCode, "evento2025"),
    ];

    for (field, text) in attendee {
        for ch in text.chars() {
            // Inputs hold the masked value, so each keystroke appends to it
            let mut typed = store.state(|s| s.value(field).to_string()).await;
            typed.push(ch);
            let _ = store
                .send(RedemptionAction::FieldChanged {
                    field,
                    value: typed,
                })
                .await?;
        }
        let shown = store.state(|s| s.value(field).to_string()).await;
        println!("{field:?}: {shown}");
    }

    println!("\n>>> Enviando formulário");
    let outcome = store
        .send_and_wait_for(
            RedemptionAction::Submit,
            |a| {
                matches!(
                    a,
                    RedemptionAction::TicketRedeemed { .. } | RedemptionAction::RedemptionFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await;

    let ticket = match outcome {
        Ok(RedemptionAction::TicketRedeemed { ticket }) => ticket,
        Ok(RedemptionAction::RedemptionFailed { message }) => {
            println!("Falha: {message}");
            return Ok(());
        },
        Ok(_) => return Ok(()),
        Err(error) => {
            let errors = store
                .state(|s| {
                    s.errors
                        .iter()
                        .map(|(field, msg)| format!("{field:?}: {msg}"))
                        .collect::<Vec<_>>()
                })
                .await;
            println!("Formulário inválido ({error}): {errors:?}");
            return Ok(());
        },
    };

    let confirmation = Store::new(
        ConfirmationState::default(),
        ConfirmationReducer::new(),
        config.event.clone(),
    );
    let _ = confirmation.send(ConfirmationAction::Show { ticket }).await?;
    if let Some(view) = confirmation.state(|s| s.view.clone()).await {
        println!("\n{view}");
    }

    store.shutdown(Duration::from_secs(1)).await?;
    Ok(())
}
