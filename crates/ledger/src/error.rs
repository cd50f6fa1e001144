//! The module contains the errors the ledger can return.
//!
//! Validation errors ([`Unauthorized`], [`AccountNotFound`],
//! [`InvalidAmount`], [`InsufficientFunds`], [`InvalidName`],
//! [`InvalidAccountType`]) are raised before any store call and have no side
//! effect. The remaining variants wrap a store failure, one per operation
//! family; when one of them surfaces the in-memory state is exactly as it was
//! before the call.
//!
//! [`Unauthorized`]: LedgerError::Unauthorized
//! [`AccountNotFound`]: LedgerError::AccountNotFound
//! [`InvalidAmount`]: LedgerError::InvalidAmount
//! [`InsufficientFunds`]: LedgerError::InsufficientFunds
//! [`InvalidName`]: LedgerError::InvalidName
//! [`InvalidAccountType`]: LedgerError::InvalidAccountType
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Authentication required!")]
    Unauthorized,
    #[error("Account \"{0}\" not found!")]
    AccountNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),
    #[error("Failed to load accounts: {0}")]
    StoreUnavailable(#[source] DbErr),
    #[error("Transaction failed: {0}")]
    TransactionFailed(#[source] DbErr),
    #[error("Transfer failed: {0}")]
    TransferFailed(#[source] DbErr),
    #[error("Update failed: {0}")]
    UpdateFailed(#[source] DbErr),
    #[error("Account creation failed: {0}")]
    CreationFailed(#[source] DbErr),
    #[error("Account deletion failed: {0}")]
    DeletionFailed(#[source] DbErr),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::AccountNotFound(a), Self::AccountNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAccountType(a), Self::InvalidAccountType(b)) => a == b,
            (Self::StoreUnavailable(a), Self::StoreUnavailable(b)) => {
                a.to_string() == b.to_string()
            }
            (Self::TransactionFailed(a), Self::TransactionFailed(b)) => {
                a.to_string() == b.to_string()
            }
            (Self::TransferFailed(a), Self::TransferFailed(b)) => a.to_string() == b.to_string(),
            (Self::UpdateFailed(a), Self::UpdateFailed(b)) => a.to_string() == b.to_string(),
            (Self::CreationFailed(a), Self::CreationFailed(b)) => a.to_string() == b.to_string(),
            (Self::DeletionFailed(a), Self::DeletionFailed(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
