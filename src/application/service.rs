use crate::domain::payment::{Payment, PaymentId, PaymentRecord};
use crate::domain::ports::{AuthorizationGatewayBox, PaymentRepositoryBox};
use crate::error::{PaymentError, Result};
use tracing::{error, info, warn};

/// The main entry point for payment processing.
///
/// `PaymentService` sends validated payments to the acquiring bank, records
/// the bank's decision and serves later lookups. It holds no state of its
/// own beyond the two ports it is built with.
pub struct PaymentService {
    gateway: AuthorizationGatewayBox,
    repository: PaymentRepositoryBox,
}

impl PaymentService {
    /// Creates a new `PaymentService`.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The acquiring bank adapter.
    /// * `repository` - The store for finalized payment records.
    pub fn new(gateway: AuthorizationGatewayBox, repository: PaymentRepositoryBox) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Authorizes and records an already validated payment.
    ///
    /// Nothing is stored unless the bank returns a real authorize or decline
    /// decision. If saving fails after the bank has decided, the decision is
    /// lost and `SaveFailed` is returned.
    ///
    /// Dropping the returned future before it resolves stores nothing.
    pub async fn process_payment(&self, mut payment: Payment) -> Result<PaymentRecord> {
        payment.id = PaymentId::generate();

        let outcome = match self.gateway.authorize(&payment).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(payment_id = %payment.id, error = %e, "bank authorization failed");
                return Err(PaymentError::AuthorizationFailed(e));
            }
        };

        payment.apply_outcome(&outcome);
        let record = payment.to_record();

        if let Err(e) = self.repository.save(record.clone()).await {
            error!(
                payment_id = %record.id,
                status = %record.status,
                error = %e,
                "bank decision could not be saved"
            );
            return Err(PaymentError::SaveFailed(e));
        }

        info!(
            payment_id = %record.id,
            status = %record.status,
            card_last_four = %record.card_number_last_four,
            currency = %record.currency,
            amount = record.amount,
            "payment processed"
        );
        Ok(record)
    }

    /// Looks up a previously processed payment.
    pub async fn get_payment(&self, id: &PaymentId) -> Result<PaymentRecord> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(PaymentError::Storage)?
            .ok_or_else(|| PaymentError::PaymentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Card;
    use crate::domain::payment::{AuthorizationOutcome, PaymentStatus};
    use crate::domain::ports::{AuthorizationGateway, PaymentRepository};
    use crate::error::{AuthorizationError, StorageError};
    use crate::infrastructure::in_memory::InMemoryPaymentRepository;
    use async_trait::async_trait;

    struct FixedGateway(std::result::Result<AuthorizationOutcome, AuthorizationError>);

    #[async_trait]
    impl AuthorizationGateway for FixedGateway {
        async fn authorize(
            &self,
            _payment: &Payment,
        ) -> std::result::Result<AuthorizationOutcome, AuthorizationError> {
            self.0.clone()
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl PaymentRepository for BrokenRepository {
        async fn save(&self, _record: PaymentRecord) -> std::result::Result<(), StorageError> {
            Err(StorageError::Backend("disk full".to_string()))
        }

        async fn find_by_id(
            &self,
            _id: &PaymentId,
        ) -> std::result::Result<Option<PaymentRecord>, StorageError> {
            Err(StorageError::Backend("connection reset".to_string()))
        }
    }

    fn approved() -> FixedGateway {
        FixedGateway(Ok(AuthorizationOutcome {
            authorized: true,
            authorization_code: "auth-123".to_string(),
        }))
    }

    fn payment() -> Payment {
        Payment::new(Card::new("2222405343248877", 4, 2099, "123"), "GBP", 100)
    }

    #[tokio::test]
    async fn test_authorized_payment_is_stored() {
        let store = InMemoryPaymentRepository::new();
        let service = PaymentService::new(Box::new(approved()), Box::new(store.clone()));

        let record = service.process_payment(payment()).await.unwrap();
        assert!(record.id.is_assigned());
        assert_eq!(record.status, PaymentStatus::Authorized);

        let stored = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_declined_payment_is_stored() {
        let store = InMemoryPaymentRepository::new();
        let gateway = FixedGateway(Ok(AuthorizationOutcome {
            authorized: false,
            authorization_code: String::new(),
        }));
        let service = PaymentService::new(Box::new(gateway), Box::new(store.clone()));

        let record = service.process_payment(payment()).await.unwrap();
        assert_eq!(record.status, PaymentStatus::Declined);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_bank_failure_stores_nothing() {
        let store = InMemoryPaymentRepository::new();
        let gateway = FixedGateway(Err(AuthorizationError::ServiceUnavailable));
        let service = PaymentService::new(Box::new(gateway), Box::new(store.clone()));

        let err = service.process_payment(payment()).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::AuthorizationFailed(AuthorizationError::ServiceUnavailable)
        ));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_distinctly() {
        let service =
            PaymentService::new(Box::new(approved()), Box::new(BrokenRepository));

        let err = service.process_payment(payment()).await.unwrap_err();
        assert!(matches!(err, PaymentError::SaveFailed(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_payment_is_not_found() {
        let service = PaymentService::new(
            Box::new(approved()),
            Box::new(InMemoryPaymentRepository::new()),
        );

        let err = service
            .get_payment(&PaymentId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::PaymentNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_storage_failure_is_not_not_found() {
        let service =
            PaymentService::new(Box::new(approved()), Box::new(BrokenRepository));

        let err = service
            .get_payment(&PaymentId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Storage(_)));
    }
}
