//! Account persistence layer
//!
//! Connection pool management plus the [`AccountStore`] contract and its
//! SQLite implementation. Store operations are transaction-participant:
//! every call runs inside a caller-supplied [`UnitOfWork`](crate::tx::UnitOfWork)
//! and never opens a transaction of its own.

pub mod account;
pub mod error;

pub use account::{Account, AccountStore, SqliteAccountStore};
pub use error::StoreError;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// SQLite database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create the database file if missing, connect, and set up the schema
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Self::setup_schema(&pool).await?;

        tracing::info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                account_id TEXT PRIMARY KEY,
                balance INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
