use sea_orm::DatabaseConnection;

use crate::{Account, LedgerError, ResultLedger};

mod accounts;
mod totals;
mod transactions;

/// The ledger: the canonical in-memory account list plus the store
/// connection.
///
/// All account and transaction mutations funnel through `&mut self`
/// operations here. Each write operation runs its store calls inside one
/// database transaction and touches the in-memory list only after the commit
/// succeeds, so a store failure leaves local state exactly as it was.
#[derive(Debug)]
pub struct Ledger {
    accounts: Vec<Account>,
    database: DatabaseConnection,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Resolve an account of this owner from local state.
    pub fn account(&self, owner_id: &str, account_id: i64) -> ResultLedger<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id && account.owner_id == owner_id)
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    fn account_mut(&mut self, owner_id: &str, account_id: i64) -> ResultLedger<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id && account.owner_id == owner_id)
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }
}

fn require_owner(owner_id: &str) -> ResultLedger<()> {
    if owner_id.trim().is_empty() {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

fn normalize_required_name(value: &str) -> ResultLedger<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidName(
            "account name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Construct `Ledger`
    ///
    /// The ledger starts with no local accounts; call
    /// [`Ledger::load_accounts`] per owner to populate it.
    pub async fn build(self) -> ResultLedger<Ledger> {
        Ok(Ledger {
            accounts: Vec::new(),
            database: self.database,
        })
    }
}
