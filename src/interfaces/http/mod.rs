//! HTTP API for merchants.
//!
//! | Method | Path                 | Handler                     |
//! |--------|----------------------|-----------------------------|
//! | GET    | `/ping`              | [`handlers::ping`]          |
//! | POST   | `/api/payments`      | [`handlers::create_payment`]|
//! | GET    | `/api/payments/{id}` | [`handlers::get_payment`]   |

pub mod handlers;
pub mod models;

use crate::application::service::PaymentService;
use crate::domain::validation::PaymentValidator;
use axum::Router;
use axum::routing::{get, post};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
    pub validator: Arc<PaymentValidator>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        service: PaymentService,
        validator: PaymentValidator,
        request_timeout: Duration,
    ) -> Self {
        Self {
            service: Arc::new(service),
            validator: Arc::new(validator),
            request_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/api/payments", post(handlers::create_payment))
        .route("/api/payments/{id}", get(handlers::get_payment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
