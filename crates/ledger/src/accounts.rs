//! The module contains the `Account` struct and its implementation.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{LedgerError, MoneyCents, transactions::Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
        }
    }

    /// Credit accounts store debt owed and invert the sign convention.
    #[must_use]
    pub fn is_credit(self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl TryFrom<&str> for AccountKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            other => Err(LedgerError::InvalidAccountType(format!(
                "invalid account kind: {other}"
            ))),
        }
    }
}

/// A bank account.
///
/// The `id` is assigned by the store at creation and is stable for the
/// account's lifetime; the kind is immutable once created. For checking and
/// savings accounts `balance` is the asset value; for credit accounts it is
/// the debt owed. `goal` is the target payoff balance and is `Some` only for
/// credit accounts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub owner_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub balance: MoneyCents,
    pub goal: Option<MoneyCents>,
    pub created_at: DateTime<Utc>,
    /// Owned transactions, newest first.
    pub transactions: Vec<Transaction>,
}

impl Account {
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.kind.is_credit()
    }

    /// Insert a freshly stored transaction at the head of the list.
    ///
    /// Transaction lists are always prepended; the caller must update
    /// `balance` in the same step so the balance invariant holds.
    pub fn prepend_transaction(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub kind: String,
    pub balance_minor: i64,
    pub goal_minor: Option<i64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Account {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            owner_id: model.user_id,
            name: model.name,
            kind: AccountKind::try_from(model.kind.as_str())?,
            balance: MoneyCents::new(model.balance_minor),
            goal: model.goal_minor.map(MoneyCents::new),
            created_at: model.created_at,
            transactions: Vec::new(),
        })
    }
}
