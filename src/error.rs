use crate::domain::validation::ValidationError;
use thiserror::Error;

/// Failures of a single call to the acquiring bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("response decode error: {0}")]
    Decode(String),
    #[error("bank rejected request: {0}")]
    Rejected(String),
    #[error("bank service unavailable")]
    ServiceUnavailable,
    #[error("unexpected response from bank: {status} - {body}")]
    Unexpected { status: u16, body: String },
    #[error("request to bank timed out")]
    Timeout,
    #[error("failed to send request to bank: {0}")]
    Transport(String),
}

/// Failures of the payment record store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("record serialization error: {0}")]
    Serialization(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to process payment with bank: {0}")]
    AuthorizationFailed(#[from] AuthorizationError),
    #[error("failed to save payment: {0}")]
    SaveFailed(#[source] StorageError),
    #[error("payment not found: {0}")]
    PaymentNotFound(String),
    #[error("failed to retrieve payment: {0}")]
    Storage(#[source] StorageError),
    #[error("failed to open payment store: {0}")]
    StoreUnavailable(#[source] StorageError),
    #[error("payment request timed out")]
    RequestTimedOut,
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
