//! In-memory ticket backend for demos and tests.

use crate::api::{ApiError, ApiFuture, TicketApi};
use crate::types::{LoginRequest, RedemptionRequest, RegisterRequest, Session, Ticket, User};
use resgate_validation::{format_cpf, format_phone, validate_cpf};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Backend {
    event_codes: HashSet<String>,
    /// `(event code, cpf digits)` pairs already redeemed
    redeemed: HashSet<(String, String)>,
    /// Accounts by username, with their password
    users: HashMap<String, (User, String)>,
    issued: u64,
}

/// Ticket backend kept in memory
///
/// Accepts redemptions for a fixed set of event codes and issues one ticket
/// per CPF per event. Accounts live in a plain table.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTicketApi {
    backend: Arc<Mutex<Backend>>,
    offline: Arc<AtomicBool>,
    latency: Duration,
}

impl InMemoryTicketApi {
    /// Create a backend accepting the given event codes
    #[must_use]
    pub fn new<I, S>(event_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Backend {
            event_codes: event_codes.into_iter().map(Into::into).collect(),
            ..Backend::default()
        };
        Self {
            backend: Arc::new(Mutex::new(backend)),
            ..Self::default()
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn TicketApi> {
        Arc::new(self)
    }

    /// Delay every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Simulate losing the connection; calls fail with [`ApiError::Connection`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of tickets issued so far
    #[must_use]
    pub fn tickets_issued(&self) -> u64 {
        self.lock().issued
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond<T, F>(&self, handler: F) -> ApiFuture<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Backend) -> Result<T, ApiError> + Send + 'static,
    {
        let api = self.clone();
        Box::pin(async move {
            if !api.latency.is_zero() {
                tokio::time::sleep(api.latency).await;
            }
            if api.offline.load(Ordering::SeqCst) {
                return Err(ApiError::Connection("backend unreachable".to_string()));
            }
            handler(&mut api.lock())
        })
    }
}

fn redeem(backend: &mut Backend, request: RedemptionRequest) -> Result<Ticket, ApiError> {
    if !backend.event_codes.contains(&request.event_code) {
        return Err(ApiError::rejected(404, "Código do evento não encontrado"));
    }
    if !validate_cpf(&request.cpf) {
        return Err(ApiError::rejected(400, "CPF inválido"));
    }
    let key = (request.event_code.clone(), request.cpf.clone());
    if !backend.redeemed.insert(key) {
        return Err(ApiError::rejected(409, "Este CPF já resgatou um ingresso para o evento"));
    }

    backend.issued += 1;
    let ticket = Ticket {
        number: format!("ING-{:06}", backend.issued),
        name: request.name,
        email: request.email,
        phone: format_phone(&request.phone),
        cpf_formatted: format_cpf(&request.cpf),
    };

    tracing::info!(
        ticket = %ticket.number,
        event_code = %request.event_code,
        "Mock ticket issued"
    );

    Ok(ticket)
}

fn register(backend: &mut Backend, request: RegisterRequest) -> Result<Session, ApiError> {
    if backend.users.contains_key(&request.username) {
        return Err(ApiError::rejected(409, "Nome de usuário já cadastrado"));
    }
    if backend.users.values().any(|(user, _)| user.email == request.email) {
        return Err(ApiError::rejected(409, "Email já cadastrado"));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username.clone(),
        email: request.email,
    };
    backend
        .users
        .insert(request.username, (user.clone(), request.password));

    tracing::info!(username = %user.username, "Mock account created");

    Ok(Session {
        user,
        token: format!("mock_token_{}", uuid::Uuid::new_v4()),
    })
}

fn login(backend: &Backend, request: &LoginRequest) -> Result<Session, ApiError> {
    backend
        .users
        .values()
        .find(|(user, password)| {
            (user.username == request.login || user.email == request.login)
                && *password == request.password
        })
        .map(|(user, _)| Session {
            user: user.clone(),
            token: format!("mock_token_{}", uuid::Uuid::new_v4()),
        })
        .ok_or_else(|| ApiError::rejected(401, "Credenciais inválidas"))
}

impl TicketApi for InMemoryTicketApi {
    fn redeem_ticket(&self, request: RedemptionRequest) -> ApiFuture<Ticket> {
        self.respond(move |backend| redeem(backend, request))
    }

    fn register(&self, request: RegisterRequest) -> ApiFuture<Session> {
        self.respond(move |backend| register(backend, request))
    }

    fn login(&self, request: LoginRequest) -> ApiFuture<Session> {
        self.respond(move |backend| login(backend, &request))
    }
}
