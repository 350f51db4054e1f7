//! End-to-end transfer scenarios against an in-memory SQLite database.
//!
//! Each test gets its own named shared-cache memory database so state
//! never leaks between tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use teller::{
    Account, AccountStore, Database, FAILURE_ACCOUNT_ID, SqliteAccountStore, StoreError,
    Transactional, TransferApi, TransferError, TransferService, TxManager, UnitOfWork,
};

struct Harness {
    // Dropping the pool would evict the in-memory database.
    _db: Database,
    tx: TxManager,
    store: SqliteAccountStore,
    api: Transactional<SqliteAccountStore>,
}

impl Harness {
    async fn new() -> Self {
        let url = format!(
            "file:memdb_{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        let db = Database::connect(&url).await.expect("connect test db");
        let tx = TxManager::new(db.pool().clone());
        let store = SqliteAccountStore;
        let api = Transactional::new(tx.clone(), TransferService::new(store));
        Self {
            _db: db,
            tx,
            store,
            api,
        }
    }

    async fn seed(&self, accounts: &[(&str, i64)]) {
        let mut uow = self.tx.begin().await.unwrap();
        for (id, balance) in accounts {
            self.store
                .save(&mut uow, &Account::new(*id, *balance))
                .await
                .unwrap();
        }
        uow.commit().await.unwrap();
    }

    async fn balance(&self, id: &str) -> i64 {
        let mut uow = self.tx.begin().await.unwrap();
        let account = self.store.find(&mut uow, id).await.unwrap();
        uow.commit().await.unwrap();
        account.balance
    }
}

#[tokio::test]
async fn transfer_moves_money_atomically() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000), ("member-b", 10_000)]).await;

    h.api
        .account_transfer("member-a", "member-b", 2_000)
        .await
        .unwrap();

    assert_eq!(h.balance("member-a").await, 8_000);
    assert_eq!(h.balance("member-b").await, 12_000);
}

#[tokio::test]
async fn transfer_applies_exactly_one_debit_credit_pair() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000), ("member-b", 10_000)]).await;

    h.api
        .account_transfer("member-a", "member-b", 2_000)
        .await
        .unwrap();
    h.api
        .account_transfer("member-a", "member-b", 2_000)
        .await
        .unwrap();

    // Two invocations, two pairs; never more per call.
    assert_eq!(h.balance("member-a").await, 6_000);
    assert_eq!(h.balance("member-b").await, 14_000);
}

#[tokio::test]
async fn sentinel_destination_rolls_back_the_debit() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000), (FAILURE_ACCOUNT_ID, 10_000)])
        .await;

    let result = h
        .api
        .account_transfer("member-a", FAILURE_ACCOUNT_ID, 2_000)
        .await;

    assert!(matches!(result, Err(TransferError::BusinessRule(_))));
    assert_eq!(h.balance("member-a").await, 10_000);
    assert_eq!(h.balance(FAILURE_ACCOUNT_ID).await, 10_000);
}

#[tokio::test]
async fn missing_source_fails_before_any_mutation() {
    let h = Harness::new().await;
    h.seed(&[("member-b", 10_000)]).await;

    let result = h.api.account_transfer("ghost", "member-b", 2_000).await;

    assert!(matches!(result, Err(TransferError::NotFound(id)) if id == "ghost"));
    assert_eq!(h.balance("member-b").await, 10_000);
}

#[tokio::test]
async fn missing_destination_fails_before_any_mutation() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000)]).await;

    let result = h.api.account_transfer("member-a", "ghost", 2_000).await;

    assert!(matches!(result, Err(TransferError::NotFound(id)) if id == "ghost"));
    assert_eq!(h.balance("member-a").await, 10_000);
}

#[tokio::test]
async fn overdraft_is_accepted_by_design() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 1_000), ("member-b", 0)]).await;

    h.api
        .account_transfer("member-a", "member-b", 5_000)
        .await
        .unwrap();

    assert_eq!(h.balance("member-a").await, -4_000);
    assert_eq!(h.balance("member-b").await, 5_000);
}

/// Store that forwards to the real SQLite store but fails after a set
/// number of updates, simulating a storage fault mid-operation.
struct FlakyStore {
    inner: SqliteAccountStore,
    updates_before_failure: usize,
    updates_seen: AtomicUsize,
}

impl FlakyStore {
    fn failing_on_update(n: usize) -> Self {
        Self {
            inner: SqliteAccountStore,
            updates_before_failure: n,
            updates_seen: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AccountStore for FlakyStore {
    async fn find(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<Account, StoreError> {
        self.inner.find(uow, account_id).await
    }

    async fn update(
        &self,
        uow: &mut UnitOfWork,
        account_id: &str,
        balance: i64,
    ) -> Result<(), StoreError> {
        if self.updates_seen.fetch_add(1, Ordering::SeqCst) >= self.updates_before_failure {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.inner.update(uow, account_id, balance).await
    }

    async fn save(&self, uow: &mut UnitOfWork, account: &Account) -> Result<(), StoreError> {
        self.inner.save(uow, account).await
    }

    async fn delete(&self, uow: &mut UnitOfWork, account_id: &str) -> Result<(), StoreError> {
        self.inner.delete(uow, account_id).await
    }
}

#[tokio::test]
async fn store_fault_on_credit_rolls_back_the_debit() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000), ("member-b", 10_000)]).await;

    // First update (the debit) succeeds, second (the credit) fails.
    let flaky = Transactional::new(
        h.tx.clone(),
        TransferService::new(FlakyStore::failing_on_update(1)),
    );

    let result = flaky.account_transfer("member-a", "member-b", 2_000).await;

    assert!(matches!(result, Err(TransferError::Store(_))));
    assert_eq!(h.balance("member-a").await, 10_000);
    assert_eq!(h.balance("member-b").await, 10_000);
}

#[tokio::test]
async fn manual_rollback_discards_mutations() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000)]).await;

    let mut uow = h.tx.begin().await.unwrap();
    h.store.update(&mut uow, "member-a", 0).await.unwrap();
    uow.rollback().await.unwrap();

    assert_eq!(h.balance("member-a").await, 10_000);
}

#[tokio::test]
async fn dropped_unit_of_work_rolls_back() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000)]).await;

    {
        let mut uow = h.tx.begin().await.unwrap();
        h.store.update(&mut uow, "member-a", 0).await.unwrap();
        // Neither commit nor rollback: the handle is dropped.
    }

    assert_eq!(h.balance("member-a").await, 10_000);
}

#[tokio::test]
async fn teardown_deletes_are_transactional_too() {
    let h = Harness::new().await;
    h.seed(&[("member-a", 10_000), ("member-b", 10_000)]).await;

    let mut uow = h.tx.begin().await.unwrap();
    h.store.delete(&mut uow, "member-a").await.unwrap();
    h.store.delete(&mut uow, "member-b").await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = h.tx.begin().await.unwrap();
    let gone = h.store.find(&mut uow, "member-a").await;
    assert!(matches!(gone, Err(StoreError::NotFound { .. })));
    uow.commit().await.unwrap();
}
