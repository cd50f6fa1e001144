//! Account repository: row ↔ entity mapping and the raw store calls.
//!
//! These functions are **not** part of the public API. They are generic over
//! [`ConnectionTrait`] so the operations can run them either directly against
//! the connection or inside one database transaction. Write helpers return
//! the raw [`DbErr`]; each operation maps it to its own error variant.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    Account, AccountKind, LedgerError, MoneyCents, ResultLedger, Transaction, accounts,
    transactions,
};

/// Accounts seeded for an owner who has none yet: name, kind, opening
/// balance in cents.
pub(crate) const DEFAULT_ACCOUNTS: [(&str, AccountKind, i64); 3] = [
    ("Primary Checking", AccountKind::Checking, 2500_00),
    ("Family Savings", AccountKind::Savings, 10000_00),
    ("Credit Card", AccountKind::Credit, 1500_00),
];

/// Fetches all accounts for an owner, newest-created first, with their
/// transactions (newest-dated first) grouped per account.
///
/// An owner with zero accounts gets the default set seeded instead of an
/// empty list.
pub(crate) async fn load_accounts<C: ConnectionTrait>(
    conn: &C,
    owner_id: &str,
) -> ResultLedger<Vec<Account>> {
    let account_models = accounts::Entity::find()
        .filter(accounts::Column::UserId.eq(owner_id))
        .order_by_desc(accounts::Column::CreatedAt)
        .order_by_desc(accounts::Column::Id)
        .all(conn)
        .await
        .map_err(LedgerError::StoreUnavailable)?;

    if account_models.is_empty() {
        return Ok(seed_defaults(conn, owner_id).await);
    }

    let account_ids: Vec<i64> = account_models.iter().map(|model| model.id).collect();
    let transaction_models = transactions::Entity::find()
        .filter(transactions::Column::AccountId.is_in(account_ids))
        .order_by_desc(transactions::Column::Date)
        .order_by_desc(transactions::Column::Id)
        .all(conn)
        .await
        .map_err(LedgerError::StoreUnavailable)?;

    let mut loaded = Vec::with_capacity(account_models.len());
    for model in account_models {
        loaded.push(Account::try_from(model)?);
    }

    // Query order is newest first, so pushing preserves the prepend
    // invariant per account.
    for model in transaction_models {
        if let Some(account) = loaded.iter_mut().find(|a| a.id == model.account_id) {
            account.transactions.push(Transaction::from(model));
        }
    }

    Ok(loaded)
}

/// Creates the default account set for a fresh owner, one insert per
/// account.
///
/// Seeding is best-effort: a failed insert is logged and skipped, the
/// remaining defaults are still created.
pub(crate) async fn seed_defaults<C: ConnectionTrait>(conn: &C, owner_id: &str) -> Vec<Account> {
    let mut seeded = Vec::with_capacity(DEFAULT_ACCOUNTS.len());

    for (name, kind, balance_minor) in DEFAULT_ACCOUNTS {
        match insert_account(conn, owner_id, name, kind, MoneyCents::new(balance_minor)).await {
            Ok(account) => seeded.push(account),
            Err(err) => {
                tracing::error!("failed to create default account \"{name}\": {err}");
            }
        }
    }

    seeded
}

/// Inserts an account and returns the stored row, id assigned by the store.
///
/// Credit accounts get a payoff goal of 0 attached; asset accounts none.
pub(crate) async fn insert_account<C: ConnectionTrait>(
    conn: &C,
    owner_id: &str,
    name: &str,
    kind: AccountKind,
    initial_balance: MoneyCents,
) -> ResultLedger<Account> {
    let model = accounts::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(owner_id.to_string()),
        name: ActiveValue::Set(name.to_string()),
        kind: ActiveValue::Set(kind.as_str().to_string()),
        balance_minor: ActiveValue::Set(initial_balance.cents()),
        goal_minor: ActiveValue::Set(kind.is_credit().then_some(0)),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(LedgerError::CreationFailed)?;

    Account::try_from(model)
}

/// Inserts a transaction row; the returned transaction carries the
/// store-assigned identifier.
pub(crate) async fn insert_transaction<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    amount: MoneyCents,
    description: &str,
    category: Option<&str>,
    date: DateTime<Utc>,
) -> Result<Transaction, DbErr> {
    let model = transactions::ActiveModel {
        id: ActiveValue::NotSet,
        account_id: ActiveValue::Set(account_id),
        date: ActiveValue::Set(date),
        amount_minor: ActiveValue::Set(amount.cents()),
        description: ActiveValue::Set(description.to_string()),
        category: ActiveValue::Set(category.map(str::to_string)),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Ok(Transaction::from(model))
}

pub(crate) async fn update_account_balance<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    balance: MoneyCents,
) -> Result<(), DbErr> {
    let model = accounts::ActiveModel {
        id: ActiveValue::Set(account_id),
        balance_minor: ActiveValue::Set(balance.cents()),
        ..Default::default()
    };
    model.update(conn).await?;
    Ok(())
}

pub(crate) async fn update_account_name<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    name: &str,
) -> Result<(), DbErr> {
    let model = accounts::ActiveModel {
        id: ActiveValue::Set(account_id),
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    };
    model.update(conn).await?;
    Ok(())
}

/// Deletes an account; the store cascades the deletion of its transactions.
pub(crate) async fn delete_account<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
) -> Result<(), DbErr> {
    accounts::Entity::delete_by_id(account_id).exec(conn).await?;
    Ok(())
}
