use chrono::Utc;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use ledger::{
    AccountKind, Ledger, LedgerError, MoneyCents, RecordTransactionCmd, TransferCmd,
};
use migration::MigratorTrait;

async fn ledger_with_db() -> (Ledger, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let ledger = Ledger::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (ledger, db)
}

async fn transaction_count(db: &DatabaseConnection, account_id: i64) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS n FROM transactions WHERE account_id = ?",
            vec![account_id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

async fn new_account(
    ledger: &mut Ledger,
    name: &str,
    kind: AccountKind,
    balance_cents: i64,
) -> i64 {
    ledger
        .add_account("alice", name, kind, MoneyCents::new(balance_cents))
        .await
        .unwrap()
}

#[tokio::test]
async fn record_moves_an_asset_balance_by_the_raw_amount() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let stored = ledger
        .record_transaction(
            RecordTransactionCmd::new("alice", checking, MoneyCents::new(50_00), Utc::now())
                .description("Paycheck")
                .category("Income"),
        )
        .await
        .unwrap();

    assert_eq!(stored.amount, MoneyCents::new(50_00));
    assert_eq!(stored.description, "Paycheck");
    assert_eq!(stored.category.as_deref(), Some("Income"));

    let account = ledger.account("alice", checking).unwrap();
    assert_eq!(account.balance, MoneyCents::new(150_00));
    assert_eq!(account.transactions[0].id, stored.id);
}

#[tokio::test]
async fn record_on_credit_raises_debt_but_stores_the_raw_amount() {
    let (mut ledger, _db) = ledger_with_db().await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 200_00).await;

    let stored = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            credit,
            MoneyCents::new(30_00),
            Utc::now(),
        ))
        .await
        .unwrap();

    // A purchase: the stored amount stays positive, the debt goes up.
    assert_eq!(stored.amount, MoneyCents::new(30_00));
    assert_eq!(
        ledger.account("alice", credit).unwrap().balance,
        MoneyCents::new(230_00)
    );
}

#[tokio::test]
async fn negative_amount_on_credit_pays_debt_down() {
    let (mut ledger, _db) = ledger_with_db().await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 200_00).await;

    ledger
        .record_transaction(
            RecordTransactionCmd::new("alice", credit, MoneyCents::new(-50_00), Utc::now())
                .description("Card payment"),
        )
        .await
        .unwrap();

    assert_eq!(
        ledger.account("alice", credit).unwrap().balance,
        MoneyCents::new(150_00)
    );
}

#[tokio::test]
async fn record_defaults_the_description() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 10_00).await;

    let stored = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            checking,
            MoneyCents::new(1_00),
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(stored.description, "Transaction");
    assert_eq!(stored.category, None);
}

#[tokio::test]
async fn record_keeps_transactions_newest_first() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let first = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            checking,
            MoneyCents::new(1_00),
            Utc::now(),
        ))
        .await
        .unwrap();
    let second = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            checking,
            MoneyCents::new(2_00),
            Utc::now(),
        ))
        .await
        .unwrap();

    let account = ledger.account("alice", checking).unwrap();
    assert_eq!(account.transactions[0].id, second.id);
    assert_eq!(account.transactions[1].id, first.id);
}

#[tokio::test]
async fn record_on_unknown_account_fails_without_writes() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let err = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            9999,
            MoneyCents::new(5_00),
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::AccountNotFound("9999".to_string()));
    assert_eq!(transaction_count(&db, checking).await, 0);
}

#[tokio::test]
async fn record_requires_an_owner() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let err = ledger
        .record_transaction(RecordTransactionCmd::new(
            " ",
            checking,
            MoneyCents::new(5_00),
            Utc::now(),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::Unauthorized);
}

#[tokio::test]
async fn transfer_moves_money_between_asset_accounts() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 150_00).await;
    let savings = new_account(&mut ledger, "Savings", AccountKind::Savings, 0).await;

    let (outgoing, incoming) = ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            savings,
            MoneyCents::new(40_00),
            "Savings",
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(outgoing.amount, MoneyCents::new(-40_00));
    assert_eq!(outgoing.description, "Transfer to Savings");
    assert_eq!(incoming.amount, MoneyCents::new(40_00));
    assert_eq!(incoming.description, "Transfer from Savings");

    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(110_00)
    );
    assert_eq!(
        ledger.account("alice", savings).unwrap().balance,
        MoneyCents::new(40_00)
    );
}

#[tokio::test]
async fn transfer_preserves_net_worth() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 500_00).await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 200_00).await;

    let before = ledger.net_worth("alice");

    ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            credit,
            MoneyCents::new(120_00),
            "Visa",
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(ledger.net_worth("alice"), before);
}

#[tokio::test]
async fn transfer_to_credit_pays_debt_down() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 500_00).await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 200_00).await;

    ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            credit,
            MoneyCents::new(120_00),
            "Visa",
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(380_00)
    );
    assert_eq!(
        ledger.account("alice", credit).unwrap().balance,
        MoneyCents::new(80_00)
    );
}

#[tokio::test]
async fn transfer_from_credit_borrows_more() {
    let (mut ledger, _db) = ledger_with_db().await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 10_00).await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 0).await;

    // A credit source has no balance floor; the transfer just borrows more.
    ledger
        .transfer_money(TransferCmd::new(
            "alice",
            credit,
            checking,
            MoneyCents::new(75_00),
            "Checking",
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(
        ledger.account("alice", credit).unwrap().balance,
        MoneyCents::new(85_00)
    );
    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(75_00)
    );
}

#[tokio::test]
async fn transfer_rejects_non_positive_amounts_without_writes() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;
    let savings = new_account(&mut ledger, "Savings", AccountKind::Savings, 0).await;

    for cents in [0, -5_00] {
        let err = ledger
            .transfer_money(TransferCmd::new(
                "alice",
                checking,
                savings,
                MoneyCents::new(cents),
                "Savings",
                Utc::now(),
            ))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidAmount("transfer amount must be greater than zero".to_string())
        );
    }

    assert_eq!(transaction_count(&db, checking).await, 0);
    assert_eq!(transaction_count(&db, savings).await, 0);
    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(100_00)
    );
}

#[tokio::test]
async fn transfer_rejects_the_same_account_on_both_sides() {
    let (mut ledger, _db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let err = ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            checking,
            MoneyCents::new(10_00),
            "Self",
            Utc::now(),
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidAmount("from_account_id and to_account_id must differ".to_string())
    );
}

#[tokio::test]
async fn transfer_rejects_overdrawing_an_asset_source() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 30_00).await;
    let savings = new_account(&mut ledger, "Savings", AccountKind::Savings, 0).await;

    let err = ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            savings,
            MoneyCents::new(40_00),
            "Savings",
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientFunds("insufficient funds for transfer".to_string())
    );
    assert_eq!(transaction_count(&db, checking).await, 0);
    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(30_00)
    );
}

#[tokio::test]
async fn update_credit_balance_records_the_adjustment() {
    let (mut ledger, _db) = ledger_with_db().await;
    let credit = new_account(&mut ledger, "Visa", AccountKind::Credit, 230_00).await;

    let stored = ledger
        .update_credit_balance("alice", credit, MoneyCents::new(180_00), Utc::now())
        .await
        .unwrap();

    // old - new: the debt dropped by $50, recorded as a payment-sized entry.
    assert_eq!(stored.amount, MoneyCents::new(50_00));
    assert_eq!(stored.description, "Weekly balance adjustment");

    let account = ledger.account("alice", credit).unwrap();
    assert_eq!(account.balance, MoneyCents::new(180_00));
    assert_eq!(account.transactions[0].id, stored.id);
}

#[tokio::test]
async fn update_credit_balance_rejects_asset_accounts() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let err = ledger
        .update_credit_balance("alice", checking, MoneyCents::new(50_00), Utc::now())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InvalidAccountType(
            "account \"Checking\" is not a credit account".to_string()
        )
    );
    assert_eq!(transaction_count(&db, checking).await, 0);
    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(100_00)
    );
}

#[tokio::test]
async fn totals_partition_accounts_by_kind() {
    let (mut ledger, _db) = ledger_with_db().await;
    new_account(&mut ledger, "Checking", AccountKind::Checking, 150_00).await;
    new_account(&mut ledger, "Savings", AccountKind::Savings, 300_00).await;
    new_account(&mut ledger, "Visa", AccountKind::Credit, 80_00).await;

    assert_eq!(ledger.total_balance("alice"), MoneyCents::new(450_00));
    assert_eq!(ledger.total_credit_debt("alice"), MoneyCents::new(80_00));
    assert_eq!(ledger.net_worth("alice"), MoneyCents::new(370_00));
}

#[tokio::test]
async fn record_keeps_local_state_when_the_store_write_fails() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 100_00).await;

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "DROP TABLE transactions"))
        .await
        .unwrap();

    let err = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            checking,
            MoneyCents::new(50_00),
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::TransactionFailed(_)));
    let account = ledger.account("alice", checking).unwrap();
    assert_eq!(account.balance, MoneyCents::new(100_00));
    assert!(account.transactions.is_empty());
}

#[tokio::test]
async fn transfer_keeps_local_state_when_the_store_write_fails() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 150_00).await;
    let savings = new_account(&mut ledger, "Savings", AccountKind::Savings, 0).await;

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "DROP TABLE transactions"))
        .await
        .unwrap();

    let err = ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            savings,
            MoneyCents::new(40_00),
            "Savings",
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::TransferFailed(_)));
    let checking = ledger.account("alice", checking).unwrap();
    assert_eq!(checking.balance, MoneyCents::new(150_00));
    assert!(checking.transactions.is_empty());
    let savings = ledger.account("alice", savings).unwrap();
    assert_eq!(savings.balance, MoneyCents::ZERO);
    assert!(savings.transactions.is_empty());
}

#[tokio::test]
async fn record_rejects_a_balance_overflow_without_writes() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, i64::MAX).await;

    let err = ledger
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            checking,
            MoneyCents::new(1),
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InvalidAmount("balance overflow".to_string())
    );
    assert_eq!(transaction_count(&db, checking).await, 0);
    assert_eq!(
        ledger.account("alice", checking).unwrap().balance,
        MoneyCents::new(i64::MAX)
    );
}

#[tokio::test]
async fn transfer_rejects_a_destination_overflow_without_writes() {
    let (mut ledger, db) = ledger_with_db().await;
    let checking = new_account(&mut ledger, "Checking", AccountKind::Checking, 10_00).await;
    let savings = new_account(&mut ledger, "Savings", AccountKind::Savings, i64::MAX).await;

    let err = ledger
        .transfer_money(TransferCmd::new(
            "alice",
            checking,
            savings,
            MoneyCents::new(10_00),
            "Savings",
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InvalidAmount("balance overflow".to_string())
    );
    assert_eq!(transaction_count(&db, checking).await, 0);
    assert_eq!(
        ledger.account("alice", savings).unwrap().balance,
        MoneyCents::new(i64::MAX)
    );
}

#[tokio::test]
async fn totals_for_an_unknown_owner_are_zero() {
    let (mut ledger, _db) = ledger_with_db().await;
    new_account(&mut ledger, "Checking", AccountKind::Checking, 150_00).await;

    assert_eq!(ledger.total_balance("bob"), MoneyCents::ZERO);
    assert_eq!(ledger.total_credit_debt("bob"), MoneyCents::ZERO);
    assert_eq!(ledger.net_worth("bob"), MoneyCents::ZERO);
}
