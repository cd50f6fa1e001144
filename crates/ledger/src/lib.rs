//! Household ledger core.
//!
//! The crate keeps a canonical in-memory list of bank accounts (checking,
//! savings, credit) consistent with a relational store. Every mutating
//! operation writes through to the store inside a single database
//! transaction and reconciles the in-memory state only after the commit
//! succeeds, so a failed operation never leaves local state half-applied.
//!
//! Credit accounts carry an inverted sign convention: their balance is debt
//! owed, so a positive transaction amount (a purchase) raises the balance of
//! an asset account but raises the *debt* of a credit account. The convention
//! lives in [`balance`] and nowhere else.

pub use accounts::{Account, AccountKind};
pub use commands::{RecordTransactionCmd, TransferCmd};
pub use error::LedgerError;
pub use money::MoneyCents;
pub use ops::{Ledger, LedgerBuilder};
pub use transactions::Transaction;

mod accounts;
pub mod balance;
mod commands;
mod error;
mod money;
mod ops;
mod store;
mod transactions;

type ResultLedger<T> = Result<T, LedgerError>;
