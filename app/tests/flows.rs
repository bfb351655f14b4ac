//! End-to-end form flows through the Store and the in-memory backend

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use resgate::mocks::InMemoryTicketApi;
use resgate::{
    FormEnvironment, FormRules, LoginAction, LoginField, LoginReducer, LoginState,
    RedemptionAction, RedemptionField, RedemptionReducer, RedemptionState, RegistrationAction,
    RegistrationField, RegistrationReducer, RegistrationState,
};
use resgate_runtime::Store;
use resgate_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

fn environment(api: &InMemoryTicketApi) -> FormEnvironment {
    FormEnvironment::new(api.clone().shared(), Arc::new(test_clock())).with_rules(FormRules {
        redirect_delay_ms: 20,
        ..FormRules::default()
    })
}

fn redemption_store(
    api: &InMemoryTicketApi,
) -> Store<RedemptionState, RedemptionAction, FormEnvironment, RedemptionReducer> {
    Store::new(
        RedemptionState::default(),
        RedemptionReducer::new(),
        environment(api),
    )
}

async fn type_into(
    store: &Store<RedemptionState, RedemptionAction, FormEnvironment, RedemptionReducer>,
    field: RedemptionField,
    value: &str,
) {
    let _ = store
        .send(RedemptionAction::FieldChanged {
            field,
            value: value.to_string(),
        })
        .await
        .unwrap();
}

async fn fill_redemption(
    store: &Store<RedemptionState, RedemptionAction, FormEnvironment, RedemptionReducer>,
    cpf: &str,
) {
    let values = [
        (RedemptionField::Name, "Maria Silva"),
        (RedemptionField::Email, "maria@example.com"),
        (RedemptionField::Cpf, cpf),
        (RedemptionField::Phone, "(11) 98765-4321"),
        (RedemptionField::EventCode, "evento2025"),
    ];
    for (field, value) in values {
        type_into(store, field, value).await;
    }
}

fn is_outcome(action: &RedemptionAction) -> bool {
    matches!(
        action,
        RedemptionAction::TicketRedeemed { .. } | RedemptionAction::RedemptionFailed { .. }
    )
}

#[tokio::test]
async fn test_redemption_issues_ticket() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]);
    let store = redemption_store(&api);

    fill_redemption(&store, "529.982.247-25").await;
    // Surrounding whitespace fails the format check
    type_into(&store, RedemptionField::Email, " maria@example.com").await;
    let _ = store.send(RedemptionAction::Submit).await.unwrap();
    let email_error = store
        .state(|s| s.errors.get(RedemptionField::Email).map(str::to_string))
        .await;
    assert_eq!(email_error.as_deref(), Some("Email inválido"));

    type_into(&store, RedemptionField::Email, "maria@example.com").await;

    let outcome = store
        .send_and_wait_for(RedemptionAction::Submit, is_outcome, TIMEOUT)
        .await
        .unwrap();
    assert!(matches!(outcome, RedemptionAction::TicketRedeemed { .. }));

    let (ticket, loading, redeemed_at) = store
        .state(|s| (s.ticket.clone(), s.is_loading, s.redeemed_at))
        .await;
    let ticket = ticket.unwrap();
    assert_eq!(ticket.cpf_formatted, "529.982.247-25");
    assert_eq!(ticket.email, "maria@example.com");
    assert!(!loading);
    assert!(redeemed_at.is_some());
    assert_eq!(api.tickets_issued(), 1);
}

#[tokio::test]
async fn test_second_redemption_for_same_cpf_is_refused() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]);

    let first = redemption_store(&api);
    fill_redemption(&first, "52998224725").await;
    let outcome = first
        .send_and_wait_for(RedemptionAction::Submit, is_outcome, TIMEOUT)
        .await
        .unwrap();
    assert!(matches!(outcome, RedemptionAction::TicketRedeemed { .. }));

    let second = redemption_store(&api);
    fill_redemption(&second, "529.982.247-25").await;
    let outcome = second
        .send_and_wait_for(RedemptionAction::Submit, is_outcome, TIMEOUT)
        .await
        .unwrap();
    assert!(matches!(outcome, RedemptionAction::RedemptionFailed { .. }));

    let (error, ticket) = second
        .state(|s| (s.submit_error.clone(), s.ticket.clone()))
        .await;
    assert_eq!(
        error.as_deref(),
        Some("Este CPF já resgatou um ingresso para o evento")
    );
    assert!(ticket.is_none());
    assert_eq!(api.tickets_issued(), 1);
}

#[tokio::test]
async fn test_connection_failure_shows_retry_message() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]);
    api.set_offline(true);
    let store = redemption_store(&api);

    fill_redemption(&store, "52998224725").await;
    let outcome = store
        .send_and_wait_for(RedemptionAction::Submit, is_outcome, TIMEOUT)
        .await
        .unwrap();

    assert!(matches!(outcome, RedemptionAction::RedemptionFailed { .. }));

    let (error, loading) = store.state(|s| (s.submit_error.clone(), s.is_loading)).await;
    assert_eq!(error.as_deref(), Some("Erro de conexão. Tente novamente."));
    assert!(!loading);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]);
    let store = redemption_store(&api);

    fill_redemption(&store, "111.111.111-11").await;
    let mut handle = store.send(RedemptionAction::Submit).await.unwrap();
    handle.wait_with_timeout(TIMEOUT).await.unwrap();

    let cpf_error = store
        .state(|s| s.errors.get(RedemptionField::Cpf).map(str::to_string))
        .await;
    assert_eq!(cpf_error.as_deref(), Some("CPF inválido"));
    assert_eq!(api.tickets_issued(), 0);
}

#[tokio::test]
async fn test_repeated_submits_issue_one_ticket() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]).with_latency(Duration::from_millis(20));
    let store = redemption_store(&api);
    fill_redemption(&store, "52998224725").await;

    let sends = (0..3).map(|_| store.send(RedemptionAction::Submit));
    for handle in futures::future::join_all(sends).await {
        let mut handle = handle.unwrap();
        handle.wait_with_timeout(TIMEOUT).await.unwrap();
    }

    assert_eq!(api.tickets_issued(), 1);
    assert!(store.state(|s| s.submit_error.is_none()).await);
}

#[tokio::test]
async fn test_reset_during_request_keeps_form_until_ticket_arrives() {
    let api = InMemoryTicketApi::new(["EVENTO2025"]).with_latency(Duration::from_millis(100));
    let store = redemption_store(&api);
    fill_redemption(&store, "52998224725").await;

    let mut submit = store.send(RedemptionAction::Submit).await.unwrap();
    let _ = store.send(RedemptionAction::Reset).await.unwrap();
    assert!(store.state(|s| s.is_loading).await);

    submit.wait_with_timeout(TIMEOUT).await.unwrap();

    let (name, loading, ticket) = store
        .state(|s| (s.name.clone(), s.is_loading, s.ticket.clone()))
        .await;
    assert_eq!(name, "Maria Silva");
    assert!(!loading);
    assert_eq!(ticket.unwrap().name, name);
    assert_eq!(api.tickets_issued(), 1);

    // Once the ticket is in, Reset clears everything
    let _ = store.send(RedemptionAction::Reset).await.unwrap();
    let (name, ticket) = store.state(|s| (s.name.clone(), s.ticket.clone())).await;
    assert!(name.is_empty());
    assert!(ticket.is_none());
}

#[tokio::test]
async fn test_registration_redirects_then_login_succeeds() {
    let api = InMemoryTicketApi::default();

    let registration = Store::new(
        RegistrationState::default(),
        RegistrationReducer::new(),
        environment(&api),
    );
    let fields = [
        (RegistrationField::Username, "maria"),
        (RegistrationField::Email, "maria@example.com"),
        (RegistrationField::Password, "segredo1"),
        (RegistrationField::ConfirmPassword, "segredo1"),
    ];
    for (field, value) in fields {
        let _ = registration
            .send(RegistrationAction::FieldChanged {
                field,
                value: value.to_string(),
            })
            .await
            .unwrap();
    }

    let _ = registration
        .send_and_wait_for(
            RegistrationAction::Submit,
            |a| matches!(a, RegistrationAction::RedirectElapsed),
            TIMEOUT,
        )
        .await
        .unwrap();
    let (completed, message) = registration
        .state(|s| (s.completed, s.success_message.clone()))
        .await;
    assert!(completed);
    assert_eq!(message.as_deref(), Some("Cadastro realizado com sucesso!"));

    let login = Store::new(LoginState::default(), LoginReducer::new(), environment(&api));
    for (field, value) in [
        (LoginField::Login, "maria@example.com"),
        (LoginField::Password, "segredo1"),
    ] {
        let _ = login
            .send(LoginAction::FieldChanged {
                field,
                value: value.to_string(),
            })
            .await
            .unwrap();
    }
    let _ = login
        .send_and_wait_for(
            LoginAction::Submit,
            |a| matches!(a, LoginAction::LoggedIn { .. } | LoginAction::LoginFailed { .. }),
            TIMEOUT,
        )
        .await
        .unwrap();

    let (completed, username) = login
        .state(|s| {
            (
                s.completed,
                s.session.as_ref().map(|session| session.user.username.clone()),
            )
        })
        .await;
    assert!(completed);
    assert_eq!(username.as_deref(), Some("maria"));
}

#[tokio::test]
async fn test_wrong_password_reports_backend_message() {
    let api = InMemoryTicketApi::default();
    let login = Store::new(LoginState::default(), LoginReducer::new(), environment(&api));

    for (field, value) in [(LoginField::Login, "ghost"), (LoginField::Password, "segredo1")] {
        let _ = login
            .send(LoginAction::FieldChanged {
                field,
                value: value.to_string(),
            })
            .await
            .unwrap();
    }
    let _ = login
        .send_and_wait_for(
            LoginAction::Submit,
            |a| matches!(a, LoginAction::LoginFailed { .. }),
            TIMEOUT,
        )
        .await
        .unwrap();

    let (error, completed) = login.state(|s| (s.login_error.clone(), s.completed)).await;
    assert_eq!(error.as_deref(), Some("Credenciais inválidas"));
    assert!(!completed);
}
