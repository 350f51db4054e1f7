//! Transaction boundary management
//!
//! [`TxManager`] opens units of work on the shared pool; [`UnitOfWork`]
//! is the handle a body of work runs against. Closing the boundary is
//! structural: `commit` and `rollback` consume the handle, so exactly one
//! of them can ever happen, and a handle that is dropped without either
//! rolls back (sqlx drops uncommitted transactions). Nested calls join an
//! open unit of work by taking `&mut UnitOfWork` instead of beginning a
//! new one; a fresh `begin` belongs only at the public entry point.

use sqlx::Transaction;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::store::StoreError;

/// Opens units of work against one connection pool
#[derive(Clone)]
pub struct TxManager {
    pool: SqlitePool,
}

impl TxManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a new unit of work.
    ///
    /// The connection backing it is held until the unit of work is
    /// committed, rolled back, or dropped, and returns to the pool on
    /// every one of those paths.
    pub async fn begin(&self) -> Result<UnitOfWork, StoreError> {
        let tx = self.pool.begin().await?;
        debug!("unit of work started");
        Ok(UnitOfWork { tx })
    }
}

/// A single atomic unit of work.
///
/// All mutations performed through this handle become durable together on
/// `commit` or are discarded together on `rollback`. The mutation log is
/// the underlying SQL transaction journal.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// The connection store-participant operations execute on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Make all mutations in this unit of work durable.
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        debug!("unit of work committed");
        Ok(())
    }

    /// Discard all mutations in this unit of work.
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        debug!("unit of work rolled back");
        Ok(())
    }
}
