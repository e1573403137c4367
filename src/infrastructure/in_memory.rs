use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentRepository;
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// Uses `Arc<RwLock<HashMap<PaymentId, PaymentRecord>>>` so clones share one
/// index. Records are inserted whole under the write lock, so readers never
/// see a partial record.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, record: PaymentRecord) -> Result<(), StorageError> {
        let mut payments = self.payments.write().await;
        payments.insert(record.id, record);
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, StorageError> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).cloned())
    }
}
