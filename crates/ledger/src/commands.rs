//! Command structs for ledger operations.
//!
//! These types group parameters for the write operations that take more than
//! a couple of arguments, keeping call sites readable.

use chrono::{DateTime, Utc};

use crate::MoneyCents;

/// Record a transaction on one account.
#[derive(Clone, Debug)]
pub struct RecordTransactionCmd {
    pub owner_id: String,
    pub account_id: i64,
    /// Caller-semantic amount; stored raw, applied to the balance through
    /// the account kind's sign convention.
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
}

impl RecordTransactionCmd {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        account_id: i64,
        amount: MoneyCents,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            account_id,
            amount,
            description: None,
            category: None,
            date,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Move money between two accounts of the same owner.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub owner_id: String,
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Must be strictly positive.
    pub amount: MoneyCents,
    /// Counterparty text; stored as "Transfer to {description}" on the
    /// source and "Transfer from {description}" on the destination.
    pub description: String,
    pub date: DateTime<Utc>,
}

impl TransferCmd {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        from_account_id: i64,
        to_account_id: i64,
        amount: MoneyCents,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            from_account_id,
            to_account_id,
            amount,
            description: description.into(),
            date,
        }
    }
}
