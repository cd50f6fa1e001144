//! Aggregate queries over the in-memory account list.
//!
//! Pure and recomputed on demand, never cached, so they are always
//! consistent with the latest reconciled state.

use crate::MoneyCents;

use super::Ledger;

impl Ledger {
    /// Total funds held across the owner's asset accounts (checking and
    /// savings).
    #[must_use]
    pub fn total_balance(&self, owner_id: &str) -> MoneyCents {
        self.accounts(owner_id)
            .filter(|account| !account.is_credit())
            .fold(MoneyCents::ZERO, |sum, account| sum + account.balance)
    }

    /// Total debt owed across the owner's credit accounts.
    #[must_use]
    pub fn total_credit_debt(&self, owner_id: &str) -> MoneyCents {
        self.accounts(owner_id)
            .filter(|account| account.is_credit())
            .fold(MoneyCents::ZERO, |sum, account| sum + account.balance)
    }

    /// Assets minus debt. Every account contributes to exactly one of the
    /// two sums.
    #[must_use]
    pub fn net_worth(&self, owner_id: &str) -> MoneyCents {
        self.total_balance(owner_id) - self.total_credit_debt(owner_id)
    }
}
