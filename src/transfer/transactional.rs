//! Declarative transaction boundary
//!
//! [`Transactional`] plays the role a transaction interceptor plays in
//! framework-managed stacks, without runtime proxying: the service is
//! composed already wrapped at construction time, and every call through
//! [`TransferApi`] is demarcated begin -> run -> commit-or-rollback.

use async_trait::async_trait;
use tracing::{error, warn};

use super::error::TransferError;
use super::service::TransferService;
use crate::store::AccountStore;
use crate::tx::TxManager;

/// Public transfer operation surface.
#[async_trait]
pub trait TransferApi: Send + Sync {
    /// Move `amount` from `from_id` to `to_id` as one atomic operation.
    async fn account_transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: i64,
    ) -> Result<(), TransferError>;
}

/// Wraps a [`TransferService`] so its operations run inside a unit of
/// work the caller never sees.
pub struct Transactional<S> {
    tx: TxManager,
    service: TransferService<S>,
}

impl<S: AccountStore> Transactional<S> {
    pub fn new(tx: TxManager, service: TransferService<S>) -> Self {
        Self { tx, service }
    }
}

#[async_trait]
impl<S: AccountStore> TransferApi for Transactional<S> {
    async fn account_transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: i64,
    ) -> Result<(), TransferError> {
        let mut uow = self.tx.begin().await?;

        match self.service.transfer(&mut uow, from_id, to_id, amount).await {
            Ok(()) => {
                uow.commit().await?;
                Ok(())
            }
            Err(err) => {
                warn!(from = from_id, to = to_id, error = %err, "transfer failed, rolling back");
                if let Err(rb) = uow.rollback().await {
                    // The original failure wins; the rollback failure is only logged.
                    error!(error = %rb, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
