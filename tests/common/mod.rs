#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Datelike;
use http_body_util::BodyExt;
use payment_gateway::application::service::PaymentService;
use payment_gateway::domain::card::Card;
use payment_gateway::domain::payment::{AuthorizationOutcome, Payment, PaymentId, PaymentRecord};
use payment_gateway::domain::ports::{AuthorizationGateway, PaymentRepository};
use payment_gateway::domain::validation::PaymentValidator;
use payment_gateway::error::{AuthorizationError, StorageError};
use payment_gateway::infrastructure::bank_client::HttpBankClient;
use payment_gateway::infrastructure::in_memory::InMemoryPaymentRepository;
use payment_gateway::interfaces::http::{AppState, router};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

pub fn next_year() -> i32 {
    chrono::Utc::now().year() + 1
}

pub fn valid_card() -> Card {
    Card::new("2222405343248877", 4, next_year(), "123")
}

pub fn valid_payment() -> Payment {
    Payment::new(valid_card(), "GBP", 100)
}

pub fn valid_request_body() -> Value {
    json!({
        "card_number": "2222405343248877",
        "expiry_month": 4,
        "expiry_year": next_year(),
        "currency": "GBP",
        "amount": 100,
        "cvv": "123"
    })
}

/// A bank double that always gives the same answer.
pub struct ScriptedGateway {
    reply: Result<AuthorizationOutcome, AuthorizationError>,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedGateway {
    pub fn approving() -> Self {
        Self::replying(Ok(AuthorizationOutcome {
            authorized: true,
            authorization_code: "auth-123".to_string(),
        }))
    }

    pub fn declining() -> Self {
        Self::replying(Ok(AuthorizationOutcome {
            authorized: false,
            authorization_code: String::new(),
        }))
    }

    pub fn failing(err: AuthorizationError) -> Self {
        Self::replying(Err(err))
    }

    pub fn replying(reply: Result<AuthorizationOutcome, AuthorizationError>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AuthorizationGateway for ScriptedGateway {
    async fn authorize(
        &self,
        _payment: &Payment,
    ) -> Result<AuthorizationOutcome, AuthorizationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

/// An in-memory store that counts `save` calls.
#[derive(Clone, Default)]
pub struct CountingRepository {
    pub inner: InMemoryPaymentRepository,
    pub saves: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentRepository for CountingRepository {
    async fn save(&self, record: PaymentRecord) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, StorageError> {
        self.inner.find_by_id(id).await
    }
}

/// The full HTTP app wired to a mock bank.
pub fn app_with_bank(server: &MockServer) -> (Router, InMemoryPaymentRepository) {
    let url = server.uri().parse().unwrap();
    let bank = HttpBankClient::new(&url, Duration::from_secs(5)).unwrap();
    let store = InMemoryPaymentRepository::new();
    let service = PaymentService::new(Box::new(bank), Box::new(store.clone()));
    let state = AppState::new(service, PaymentValidator::default(), Duration::from_secs(10));
    (router(state), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
