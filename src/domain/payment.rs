use super::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned to a payment by the payment service.
///
/// The nil UUID stands for "not yet assigned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn is_assigned(&self) -> bool {
        !self.0.is_nil()
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl From<Uuid> for PaymentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum PaymentStatus {
    /// Never sent to the bank. Validation failures never leave the caller.
    #[default]
    Rejected,
    Authorized,
    Declined,
}

impl PaymentStatus {
    /// `Authorized` and `Declined` are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Authorized | PaymentStatus::Declined)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Rejected => "Rejected",
            PaymentStatus::Authorized => "Authorized",
            PaymentStatus::Declined => "Declined",
        };
        f.write_str(label)
    }
}

/// The bank's decision for a single authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationOutcome {
    pub authorized: bool,
    /// Empty when declined.
    pub authorization_code: String,
}

/// A card payment moving through the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub card: Card,
    pub currency: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub status: PaymentStatus,
}

impl Payment {
    /// Builds an unvalidated payment with no id and status `Rejected`.
    pub fn new(card: Card, currency: impl Into<String>, amount: i64) -> Self {
        Self {
            id: PaymentId::default(),
            card,
            currency: currency.into(),
            amount,
            status: PaymentStatus::Rejected,
        }
    }

    /// Applies the bank's decision. Terminal payments are left untouched.
    pub fn apply_outcome(&mut self, outcome: &AuthorizationOutcome) {
        if self.status.is_terminal() {
            return;
        }
        self.status = if outcome.authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        };
    }

    /// The persisted view of this payment. Drops the full card number and CVV.
    pub fn to_record(&self) -> PaymentRecord {
        PaymentRecord {
            id: self.id,
            status: self.status,
            card_number_last_four: self.card.last_four(),
            expiry_month: self.card.expiry_month,
            expiry_year: self.card.expiry_year,
            currency: self.currency.clone(),
            amount: self.amount,
        }
    }
}

/// A finalized payment as stored and returned to merchants.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}
