use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentRepository;
use crate::error::StorageError;
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payment store backed by RocksDB.
///
/// Records live in their own column family, keyed by the 16 raw bytes of the
/// payment id and encoded as JSON. A single `put_cf` writes each record, so
/// a reader sees either the old value or the new one.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBPaymentRepository {
    db: Arc<DB>,
}

impl RocksDBPaymentRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl PaymentRepository for RocksDBPaymentRepository {
    async fn save(&self, record: PaymentRecord) -> Result<(), StorageError> {
        let cf = self
            .db
            .cf_handle(CF_PAYMENTS)
            .ok_or_else(|| StorageError::Backend("Payments column family not found".into()))?;

        let value = serde_json::to_vec(&record)
            .map_err(|e| StorageError::Serialization(format!("Serialization error: {}", e)))?;

        self.db.put_cf(&cf, record.id.as_bytes(), value)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, StorageError> {
        let cf = self
            .db
            .cf_handle(CF_PAYMENTS)
            .ok_or_else(|| StorageError::Backend("Payments column family not found".into()))?;

        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(|e| {
                    StorageError::Serialization(format!("Deserialization error: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
