use thiserror::Error;

use crate::store::StoreError;

/// Domain-level transfer errors.
///
/// Store errors are translated at the service boundary so callers depend
/// on this taxonomy, not on the storage technology. Every variant aborts
/// the enclosing unit of work.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("account not found: {0}")]
    NotFound(String),

    #[error("transfer rejected: {0}")]
    BusinessRule(String),

    #[error("store failure: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => TransferError::NotFound(id),
            other => TransferError::Store(other),
        }
    }
}
