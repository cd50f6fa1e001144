//! Account lifecycle operations: load/seed, create, rename, delete.

use crate::{Account, AccountKind, LedgerError, MoneyCents, ResultLedger, store};

use super::{Ledger, normalize_required_name, require_owner};

impl Ledger {
    /// Replaces the owner's local accounts with a fresh fetch from the
    /// store.
    ///
    /// An owner with zero stored accounts gets the default set seeded
    /// instead of an empty list. On a store failure the owner's local slice
    /// is left empty and the error surfaces, so stale state never outlives a
    /// failed reload.
    pub async fn load_accounts(&mut self, owner_id: &str) -> ResultLedger<()> {
        require_owner(owner_id)?;

        self.accounts.retain(|account| account.owner_id != owner_id);
        let mut loaded = store::load_accounts(&self.database, owner_id).await?;
        self.accounts.append(&mut loaded);
        Ok(())
    }

    /// Accounts of an owner, in load order (newest-created first).
    pub fn accounts(&self, owner_id: &str) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |account| account.owner_id == owner_id)
    }

    /// Creates an account and appends it to local state.
    ///
    /// Credit accounts get a payoff goal of 0; the kind is immutable from
    /// here on. Returns the store-assigned account id.
    pub async fn add_account(
        &mut self,
        owner_id: &str,
        name: &str,
        kind: AccountKind,
        initial_balance: MoneyCents,
    ) -> ResultLedger<i64> {
        require_owner(owner_id)?;
        let name = normalize_required_name(name)?;

        let account =
            store::insert_account(&self.database, owner_id, &name, kind, initial_balance).await?;
        let account_id = account.id;
        self.accounts.push(account);
        Ok(account_id)
    }

    /// Renames an account in the store, then in place locally.
    ///
    /// Renaming to the current name is a no-op beyond the store round trip.
    pub async fn rename_account(
        &mut self,
        owner_id: &str,
        account_id: i64,
        new_name: &str,
    ) -> ResultLedger<()> {
        require_owner(owner_id)?;
        let name = normalize_required_name(new_name)?;
        self.account(owner_id, account_id)?;

        store::update_account_name(&self.database, account_id, &name)
            .await
            .map_err(LedgerError::UpdateFailed)?;

        let account = self.account_mut(owner_id, account_id)?;
        account.name = name;
        Ok(())
    }

    /// Deletes an account; the store cascades the deletion of its
    /// transactions.
    pub async fn delete_account(&mut self, owner_id: &str, account_id: i64) -> ResultLedger<()> {
        require_owner(owner_id)?;
        self.account(owner_id, account_id)?;

        store::delete_account(&self.database, account_id)
            .await
            .map_err(LedgerError::DeletionFailed)?;

        self.accounts.retain(|account| account.id != account_id);
        Ok(())
    }
}
