//! HTTP adapter for the acquiring bank.
//!
//! One `POST {base_url}/payments` per authorization, bounded by a fixed
//! timeout, never retried. The bank's reply is mapped to an outcome by
//! [`classify_response`], which does no I/O.

use crate::domain::payment::{AuthorizationOutcome, Payment};
use crate::domain::ports::AuthorizationGateway;
use crate::error::{AuthorizationError, PaymentError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request body expected by the bank.
#[derive(Serialize)]
pub struct BankRequest<'a> {
    pub card_number: &'a str,
    /// `MM/YYYY`.
    pub expiry_date: String,
    pub currency: &'a str,
    pub amount: i64,
    pub cvv: &'a str,
}

impl<'a> From<&'a Payment> for BankRequest<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            card_number: &payment.card.number,
            expiry_date: payment.card.expiry_date(),
            currency: &payment.currency,
            amount: payment.amount,
            cvv: &payment.card.cvv,
        }
    }
}

/// Response body returned by the bank on HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankResponse {
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: String,
}

impl From<BankResponse> for AuthorizationOutcome {
    fn from(resp: BankResponse) -> Self {
        Self {
            authorized: resp.authorized,
            authorization_code: resp.authorization_code,
        }
    }
}

/// Maps a bank HTTP status and body to an authorization outcome.
pub fn classify_response(
    status: StatusCode,
    body: &str,
) -> std::result::Result<AuthorizationOutcome, AuthorizationError> {
    match status {
        StatusCode::OK => serde_json::from_str::<BankResponse>(body)
            .map(AuthorizationOutcome::from)
            .map_err(|e| AuthorizationError::Decode(e.to_string())),
        StatusCode::BAD_REQUEST => Err(AuthorizationError::Rejected(body.to_string())),
        StatusCode::SERVICE_UNAVAILABLE => Err(AuthorizationError::ServiceUnavailable),
        other => Err(AuthorizationError::Unexpected {
            status: other.as_u16(),
            body: body.to_string(),
        }),
    }
}

fn transport_error(e: reqwest::Error) -> AuthorizationError {
    if e.is_timeout() {
        AuthorizationError::Timeout
    } else {
        AuthorizationError::Transport(e.to_string())
    }
}

/// Talks to the acquiring bank over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBankClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpBankClient {
    /// Builds a client for the bank at `base_url`.
    ///
    /// Every call, including reading the response body, is bounded by `timeout`.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::Config(format!("failed to build bank client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/payments", base_url.as_str().trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AuthorizationGateway for HttpBankClient {
    async fn authorize(
        &self,
        payment: &Payment,
    ) -> std::result::Result<AuthorizationOutcome, AuthorizationError> {
        debug!(
            endpoint = %self.endpoint,
            payment_id = %payment.id,
            card_last_four = %payment.card.last_four(),
            "sending authorization request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&BankRequest::from(payment))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        debug!(payment_id = %payment.id, status = status.as_u16(), "bank responded");

        classify_response(status, &body)
    }
}
