//! Account transfer service
//!
//! Business logic for moving money between two accounts, kept free of
//! transaction vocabulary. The [`Transactional`] decorator is the public
//! entry point: it wraps every [`TransferApi`] call in a unit of work,
//! committing on success and rolling back on any error.

pub mod error;
pub mod service;
pub mod transactional;

pub use error::TransferError;
pub use service::{FAILURE_ACCOUNT_ID, TransferService};
pub use transactional::{Transactional, TransferApi};
