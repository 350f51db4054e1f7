//! Core transfer business logic

use tracing::info;

use super::error::TransferError;
use crate::store::{Account, AccountStore};
use crate::tx::UnitOfWork;

/// Reserved account id that deterministically fails destination
/// validation. Stands in for a real business rule (e.g. destination
/// account must be active) and exists to exercise rollback behavior.
pub const FAILURE_ACCOUNT_ID: &str = "ex";

/// Moves money between two accounts.
///
/// The body contains no transaction control at all: it runs against
/// whatever [`UnitOfWork`] the caller supplies and lets every error
/// propagate so the enclosing boundary can react. Overdrafts are not
/// rejected; a source balance may go arbitrarily negative.
pub struct TransferService<S> {
    store: S,
}

impl<S: AccountStore> TransferService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Debit `from_id` and credit `to_id` by `amount` inside the given
    /// unit of work.
    ///
    /// The debit is persisted before the destination is validated, so a
    /// validation failure leaves a dangling debit for the boundary to
    /// roll back.
    pub async fn transfer(
        &self,
        uow: &mut UnitOfWork,
        from_id: &str,
        to_id: &str,
        amount: i64,
    ) -> Result<(), TransferError> {
        let from = self.store.find(uow, from_id).await?;
        let to = self.store.find(uow, to_id).await?;

        self.store
            .update(uow, from_id, from.balance - amount)
            .await?;
        validate_destination(&to)?;
        self.store.update(uow, to_id, to.balance + amount).await?;

        info!(from = from_id, to = to_id, amount, "transfer applied");
        Ok(())
    }
}

/// Destination validation rule.
///
/// Pure over the looked-up record: same record, same verdict.
fn validate_destination(to: &Account) -> Result<(), TransferError> {
    if to.account_id == FAILURE_ACCOUNT_ID {
        return Err(TransferError::BusinessRule(format!(
            "destination account '{}' rejects transfers",
            to.account_id
        )));
    }
    Ok(())
}
