//! Teller demo binary
//!
//! Boots the stack the way a deployment would: load config, init logging,
//! connect the pool, compose the transfer service already wrapped in its
//! transaction boundary, then run one transfer and report balances.

use anyhow::Result;
use tracing::info;

use teller::logging::init_logging;
use teller::{
    Account, AccountStore, AppConfig, Database, SqliteAccountStore, Transactional, TransferApi,
    TransferService, TxManager,
};

fn get_env() -> String {
    std::env::args().nth(1).unwrap_or_else(|| "dev".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(&get_env());
    let _guard = init_logging(&config);

    let db = Database::connect(&config.database_url).await?;
    let tx = TxManager::new(db.pool().clone());
    let store = SqliteAccountStore;

    // Constructor-level composition: the service leaves the factory
    // already wrapped in its boundary decorator.
    let service = Transactional::new(tx.clone(), TransferService::new(store));

    // Reset the demo accounts so repeated runs start from the same state.
    let mut uow = tx.begin().await?;
    for (id, balance) in [("alice", 10_000), ("bob", 10_000)] {
        store.delete(&mut uow, id).await?;
        store.save(&mut uow, &Account::new(id, balance)).await?;
    }
    uow.commit().await?;

    service.account_transfer("alice", "bob", 2_000).await?;

    let mut uow = tx.begin().await?;
    let alice = store.find(&mut uow, "alice").await?;
    let bob = store.find(&mut uow, "bob").await?;
    uow.commit().await?;

    info!(
        alice = alice.balance,
        bob = bob.balance,
        "balances after transfer"
    );
    println!("alice: {}  bob: {}", alice.balance, bob.balance);

    Ok(())
}
