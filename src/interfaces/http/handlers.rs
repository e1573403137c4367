use super::AppState;
use super::models::{ErrorResponse, PaymentResponse, Pong, PostPaymentRequest};
use crate::domain::payment::PaymentId;
use crate::domain::validation::ValidationError;
use crate::error::PaymentError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    InvalidBody,
    Payment(PaymentError),
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::Payment(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Payment(PaymentError::Validation(err))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body".to_string()),
            Self::Payment(PaymentError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Payment(PaymentError::AuthorizationFailed(_)) => (
                StatusCode::BAD_GATEWAY,
                "Unable to process payment with bank".to_string(),
            ),
            Self::Payment(PaymentError::RequestTimedOut) => (
                StatusCode::GATEWAY_TIMEOUT,
                "Payment request timed out".to_string(),
            ),
            Self::Payment(PaymentError::PaymentNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Payment not found".to_string())
            }
            Self::Payment(PaymentError::SaveFailed(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save payment".to_string(),
            ),
            Self::Payment(PaymentError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve payment".to_string(),
            ),
            Self::Payment(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Only the operator sees the underlying cause of a 500.
        if status.is_server_error()
            && let Self::Payment(e) = &self
        {
            error!(error = %e, status = status.as_u16(), "payment request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub async fn ping() -> Json<Pong> {
    Json(Pong {
        message: "pong".to_string(),
    })
}

pub async fn create_payment(
    State(state): State<AppState>,
    body: Result<Json<PostPaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::InvalidBody)?;

    let mut payment = request.into_payment();
    state.validator.validate(&mut payment)?;

    // Hitting the deadline drops the in-flight call; nothing is persisted.
    let record = tokio::time::timeout(
        state.request_timeout,
        state.service.process_payment(payment),
    )
    .await
    .map_err(|_| PaymentError::RequestTimedOut)??;

    Ok(Json(record.into()))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    // An id that is not a UUID was never issued by this gateway.
    let id: PaymentId = id
        .parse()
        .map_err(|_| PaymentError::PaymentNotFound(id.clone()))?;

    let record = state.service.get_payment(&id).await?;
    Ok(Json(record.into()))
}
