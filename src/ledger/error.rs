//! Error types for ledger operations.

use thiserror::Error;

use crate::Amount;
use crate::model::NationalId;

/// Rejection raised by an account primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("invalid amount {0}: must be greater than zero")]
    InvalidAmount(Amount),

    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Amount, requested: Amount },

    #[error("amount {requested} exceeds the withdrawal limit of {limit}")]
    LimitExceeded { limit: Amount, requested: Amount },

    #[error("maximum number of withdrawals reached ({0})")]
    TooManyWithdrawals(usize),

    #[error("amount {requested} would overflow the balance of {balance}")]
    BalanceOverflow { balance: Amount, requested: Amount },
}

/// Top-level error returned by [`Ledger`](super::Ledger) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("user {0} not found")]
    UserNotFound(NationalId),

    #[error("user {0} is already registered")]
    DuplicateUser(NationalId),

    #[error("user {0} has no account")]
    NoAccount(NationalId),

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Flat view of every failure the ledger can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidAmount,
    InsufficientFunds,
    LimitExceeded,
    TooManyWithdrawals,
    UserNotFound,
    DuplicateUser,
    NoAccount,
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidAmount(_) | AccountError::BalanceOverflow { .. } => {
                ErrorKind::InvalidAmount
            }
            AccountError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            AccountError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            AccountError::TooManyWithdrawals(_) => ErrorKind::TooManyWithdrawals,
        }
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::UserNotFound(_) => ErrorKind::UserNotFound,
            LedgerError::DuplicateUser(_) => ErrorKind::DuplicateUser,
            LedgerError::NoAccount(_) => ErrorKind::NoAccount,
            LedgerError::Account(e) => e.kind(),
        }
    }
}
