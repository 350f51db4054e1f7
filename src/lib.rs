//! Teller - Atomic account transfers over a relational store
//!
//! A layered rendition of the classic bank-transfer exercise: repository,
//! transaction boundary manager, and a transfer service whose business
//! logic carries no transaction vocabulary at all.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup (file + stdout)
//! - [`store`] - account records and the SQLite-backed store
//! - [`tx`] - unit-of-work handles and the boundary manager
//! - [`transfer`] - transfer business logic and its transactional wrapper

pub mod config;
pub mod logging;
pub mod store;
pub mod transfer;
pub mod tx;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use store::{Account, AccountStore, Database, SqliteAccountStore, StoreError};
pub use transfer::{FAILURE_ACCOUNT_ID, Transactional, TransferApi, TransferError, TransferService};
pub use tx::{TxManager, UnitOfWork};
