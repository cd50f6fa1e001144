//! Balance-mutating operations: record, transfer, credit statement sync.
//!
//! Each operation is two-phase: every store write runs inside one database
//! transaction, and the in-memory accounts are reconciled only after the
//! commit. A failure anywhere leaves local state untouched.

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;

use crate::{
    LedgerError, MoneyCents, RecordTransactionCmd, ResultLedger, Transaction, TransferCmd,
    balance, store,
};

use super::{Ledger, require_owner};

/// Description used when the caller omits one.
const DEFAULT_DESCRIPTION: &str = "Transaction";

/// Description attached to credit statement sync adjustments.
const ADJUSTMENT_DESCRIPTION: &str = "Weekly balance adjustment";

fn apply_delta(balance: MoneyCents, delta: MoneyCents) -> ResultLedger<MoneyCents> {
    balance
        .checked_add(delta)
        .ok_or_else(|| LedgerError::InvalidAmount("balance overflow".to_string()))
}

impl Ledger {
    /// Records a transaction on one account.
    ///
    /// The stored transaction keeps the caller's raw amount; the balance
    /// moves by the kind-specific delta from [`balance::balance_delta`].
    /// Returns the stored transaction, id assigned by the store.
    pub async fn record_transaction(
        &mut self,
        cmd: RecordTransactionCmd,
    ) -> ResultLedger<Transaction> {
        require_owner(&cmd.owner_id)?;

        let new_balance = {
            let account = self.account(&cmd.owner_id, cmd.account_id)?;
            apply_delta(
                account.balance,
                balance::balance_delta(account.kind, cmd.amount),
            )?
        };
        let description = cmd
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        let db_tx = self
            .database
            .begin()
            .await
            .map_err(LedgerError::TransactionFailed)?;
        let stored = store::insert_transaction(
            &db_tx,
            cmd.account_id,
            cmd.amount,
            &description,
            cmd.category.as_deref(),
            cmd.date,
        )
        .await
        .map_err(LedgerError::TransactionFailed)?;
        store::update_account_balance(&db_tx, cmd.account_id, new_balance)
            .await
            .map_err(LedgerError::TransactionFailed)?;
        db_tx
            .commit()
            .await
            .map_err(LedgerError::TransactionFailed)?;

        let account = self.account_mut(&cmd.owner_id, cmd.account_id)?;
        account.balance = new_balance;
        account.prepend_transaction(stored.clone());
        Ok(stored)
    }

    /// Moves money between two accounts of the same owner.
    ///
    /// Writes two transaction rows (`-amount` on the source, `+amount` on
    /// the destination) and both balance updates atomically at the store.
    /// Non-credit sources must cover the amount; credit sources have no
    /// balance floor, the outgoing transfer just borrows more.
    pub async fn transfer_money(
        &mut self,
        cmd: TransferCmd,
    ) -> ResultLedger<(Transaction, Transaction)> {
        require_owner(&cmd.owner_id)?;

        if !cmd.amount.is_positive() {
            return Err(LedgerError::InvalidAmount(
                "transfer amount must be greater than zero".to_string(),
            ));
        }
        if cmd.from_account_id == cmd.to_account_id {
            return Err(LedgerError::InvalidAmount(
                "from_account_id and to_account_id must differ".to_string(),
            ));
        }

        let (from_kind, from_balance) = {
            let from = self.account(&cmd.owner_id, cmd.from_account_id)?;
            (from.kind, from.balance)
        };
        let (to_kind, to_balance) = {
            let to = self.account(&cmd.owner_id, cmd.to_account_id)?;
            (to.kind, to.balance)
        };

        if !from_kind.is_credit() && from_balance < cmd.amount {
            return Err(LedgerError::InsufficientFunds(
                "insufficient funds for transfer".to_string(),
            ));
        }

        let (from_delta, to_delta) = balance::transfer_deltas(from_kind, to_kind, cmd.amount);
        let new_from_balance = apply_delta(from_balance, from_delta)?;
        let new_to_balance = apply_delta(to_balance, to_delta)?;

        let db_tx = self
            .database
            .begin()
            .await
            .map_err(LedgerError::TransferFailed)?;
        let outgoing = store::insert_transaction(
            &db_tx,
            cmd.from_account_id,
            -cmd.amount,
            &format!("Transfer to {}", cmd.description),
            None,
            cmd.date,
        )
        .await
        .map_err(LedgerError::TransferFailed)?;
        let incoming = store::insert_transaction(
            &db_tx,
            cmd.to_account_id,
            cmd.amount,
            &format!("Transfer from {}", cmd.description),
            None,
            cmd.date,
        )
        .await
        .map_err(LedgerError::TransferFailed)?;
        store::update_account_balance(&db_tx, cmd.from_account_id, new_from_balance)
            .await
            .map_err(LedgerError::TransferFailed)?;
        store::update_account_balance(&db_tx, cmd.to_account_id, new_to_balance)
            .await
            .map_err(LedgerError::TransferFailed)?;
        db_tx.commit().await.map_err(LedgerError::TransferFailed)?;

        {
            let from = self.account_mut(&cmd.owner_id, cmd.from_account_id)?;
            from.balance = new_from_balance;
            from.prepend_transaction(outgoing.clone());
        }
        {
            let to = self.account_mut(&cmd.owner_id, cmd.to_account_id)?;
            to.balance = new_to_balance;
            to.prepend_transaction(incoming.clone());
        }

        Ok((outgoing, incoming))
    }

    /// Overwrites a credit account's balance to match a statement.
    ///
    /// Records a synthetic adjustment transaction of `old - new` so the
    /// balance invariant still holds, then sets the balance to `new_balance`
    /// exactly. Non-credit accounts are rejected; `new_balance >= 0` is the
    /// caller's responsibility.
    pub async fn update_credit_balance(
        &mut self,
        owner_id: &str,
        account_id: i64,
        new_balance: MoneyCents,
        date: DateTime<Utc>,
    ) -> ResultLedger<Transaction> {
        require_owner(owner_id)?;

        let adjustment = {
            let account = self.account(owner_id, account_id)?;
            if !account.is_credit() {
                return Err(LedgerError::InvalidAccountType(format!(
                    "account \"{}\" is not a credit account",
                    account.name
                )));
            }
            balance::adjustment_amount(account.balance, new_balance)
        };

        let db_tx = self
            .database
            .begin()
            .await
            .map_err(LedgerError::UpdateFailed)?;
        let stored = store::insert_transaction(
            &db_tx,
            account_id,
            adjustment,
            ADJUSTMENT_DESCRIPTION,
            None,
            date,
        )
        .await
        .map_err(LedgerError::UpdateFailed)?;
        store::update_account_balance(&db_tx, account_id, new_balance)
            .await
            .map_err(LedgerError::UpdateFailed)?;
        db_tx.commit().await.map_err(LedgerError::UpdateFailed)?;

        let account = self.account_mut(owner_id, account_id)?;
        account.balance = new_balance;
        account.prepend_transaction(stored.clone());
        Ok(stored)
    }
}
