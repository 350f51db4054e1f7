use thiserror::Error;

/// Errors surfaced by the account store.
///
/// This is the only error type that crosses the store boundary; the service
/// layer translates it into its own taxonomy so callers never depend on
/// `sqlx` types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account not found: {id}")]
    NotFound { id: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
