//! Transaction primitives.
//!
//! A `Transaction` records a single balance-affecting event on one account.
//! Transactions are created only as a side effect of a ledger operation and
//! are never edited or deleted individually; deleting an account cascades
//! the deletion of its transactions in the store.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// A stored transaction.
///
/// `amount` is the caller's semantic amount, never inverted: for asset
/// accounts positive means deposit, for credit accounts positive means a
/// purchase that raised the debt. The identifier is assigned by the store at
/// insert time; the ledger never invents ids for persisted transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub date: DateTime<Utc>,
    pub amount: MoneyCents,
    pub description: String,
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub date: DateTimeUtc,
    pub amount_minor: i64,
    pub description: String,
    pub category: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            date: model.date,
            amount: MoneyCents::new(model.amount_minor),
            description: model.description,
            category: model.category,
        }
    }
}
