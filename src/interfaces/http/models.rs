use crate::domain::card::Card;
use crate::domain::payment::{Payment, PaymentRecord, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/payments`.
///
/// Missing fields fall back to empty or zero so that validation reports
/// them as required.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PostPaymentRequest {
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl PostPaymentRequest {
    /// An unvalidated payment built from the request fields.
    pub fn into_payment(self) -> Payment {
        let card = Card::new(
            self.card_number,
            self.expiry_month,
            self.expiry_year,
            self.cvv,
        );
        Payment::new(card, self.currency, self.amount)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResponse {
    pub id: String,
    pub status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            status: record.status,
            card_number_last_four: record.card_number_last_four,
            expiry_month: record.expiry_month,
            expiry_year: record.expiry_year,
            currency: record.currency,
            amount: record.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pong {
    pub message: String,
}
