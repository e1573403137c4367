use super::payment::{AuthorizationOutcome, Payment, PaymentId, PaymentRecord};
use crate::error::{AuthorizationError, StorageError};
use async_trait::async_trait;

/// Keyed storage of finalized payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts or replaces the record stored under `record.id`.
    async fn save(&self, record: PaymentRecord) -> Result<(), StorageError>;
    /// `Ok(None)` means the id was never saved.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, StorageError>;
}

/// The acquiring bank, as seen by the payment service.
#[async_trait]
pub trait AuthorizationGateway: Send + Sync {
    async fn authorize(&self, payment: &Payment)
    -> Result<AuthorizationOutcome, AuthorizationError>;
}

pub type PaymentRepositoryBox = Box<dyn PaymentRepository>;
pub type AuthorizationGatewayBox = Box<dyn AuthorizationGateway>;
