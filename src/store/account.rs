//! Account record and store operations

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

use super::error::StoreError;
use crate::tx::UnitOfWork;

/// A named account holding a balance in integer currency units.
///
/// Balances are allowed to go negative; whether overdrafts should be
/// rejected is an open policy question and is deliberately not enforced
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: String,
    pub balance: i64,
}

impl Account {
    pub fn new(account_id: impl Into<String>, balance: i64) -> Self {
        Self {
            account_id: account_id.into(),
            balance,
        }
    }
}

/// Store contract for account records.
///
/// Every operation takes the caller's active [`UnitOfWork`], so store calls
/// are transaction-participant by construction: there is no way to read or
/// mutate account state outside a unit of work, and no store call ever
/// starts a transaction of its own.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by id. Fails with [`StoreError::NotFound`] if
    /// no matching row exists.
    async fn find(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<Account, StoreError>;

    /// Overwrite the stored balance of an existing account.
    async fn update(
        &self,
        uow: &mut UnitOfWork,
        account_id: &str,
        balance: i64,
    ) -> Result<(), StoreError>;

    /// Insert a new account record.
    async fn save(&self, uow: &mut UnitOfWork, account: &Account) -> Result<(), StoreError>;

    /// Remove an account record. Removing an absent id is not an error.
    async fn delete(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<(), StoreError>;
}

/// SQLite-backed account store
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteAccountStore;

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn find(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<Account, StoreError> {
        let row: Option<Account> =
            sqlx::query_as(r#"SELECT account_id, balance FROM accounts WHERE account_id = ?"#)
                .bind(account_id)
                .fetch_optional(uow.conn())
                .await?;

        row.ok_or_else(|| StoreError::NotFound {
            id: account_id.to_string(),
        })
    }

    async fn update(
        &self,
        uow: &mut UnitOfWork,
        account_id: &str,
        balance: i64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(r#"UPDATE accounts SET balance = ? WHERE account_id = ?"#)
            .bind(balance)
            .bind(account_id)
            .execute(uow.conn())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                id: account_id.to_string(),
            });
        }

        debug!(account_id, balance, "account balance updated");
        Ok(())
    }

    async fn save(&self, uow: &mut UnitOfWork, account: &Account) -> Result<(), StoreError> {
        sqlx::query(r#"INSERT INTO accounts (account_id, balance) VALUES (?, ?)"#)
            .bind(&account.account_id)
            .bind(account.balance)
            .execute(uow.conn())
            .await?;

        debug!(
            account_id = %account.account_id,
            balance = account.balance,
            "account saved"
        );
        Ok(())
    }

    async fn delete(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM accounts WHERE account_id = ?"#)
            .bind(account_id)
            .execute(uow.conn())
            .await?;

        debug!(account_id, "account deleted");
        Ok(())
    }
}
