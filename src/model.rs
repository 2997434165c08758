//! Core domain types for the ledger.

use std::fmt;

use chrono::NaiveDate;

use crate::Amount;

/// National identification number (CPF). Unique key of a user.
pub type NationalId = String;

/// Sequential account number, starting at 1.
pub type AccountNumber = u32;

/// Kind of a recorded movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Deposit => f.write_str("Deposit"),
            MovementKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// An operation that can be applied to an account.
///
/// Exists only while it is dispatched; a successful application leaves a
/// [`Movement`](crate::ledger::Movement) in the account statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Credit the amount to the account balance.
    Deposit(Amount),
    /// Debit the amount from the account balance.
    Withdrawal(Amount),
}

impl Operation {
    pub fn amount(&self) -> Amount {
        match self {
            Operation::Deposit(amount) | Operation::Withdrawal(amount) => *amount,
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            Operation::Deposit(_) => MovementKind::Deposit,
            Operation::Withdrawal(_) => MovementKind::Withdrawal,
        }
    }
}

/// Withdrawal caps carried by checking accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingPolicy {
    /// Largest amount a single withdrawal may take.
    pub per_withdrawal_limit: Amount,
    /// Number of successful withdrawals after which further ones are refused.
    pub max_withdrawals: usize,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            per_withdrawal_limit: Amount::from_units(500),
            max_withdrawals: 3,
        }
    }
}

/// A mutating request against the ledger, as produced by a script or the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new user.
    RegisterUser {
        national_id: NationalId,
        full_name: String,
        birth_date: NaiveDate,
        address: String,
    },
    /// Open a checking account for an existing user.
    OpenAccount { national_id: NationalId },
    /// Deposit into the user's first account.
    Deposit {
        national_id: NationalId,
        amount: Amount,
    },
    /// Withdraw from the user's first account.
    Withdraw {
        national_id: NationalId,
        amount: Amount,
    },
}

impl Command {
    pub fn national_id(&self) -> &str {
        match self {
            Command::RegisterUser { national_id, .. }
            | Command::OpenAccount { national_id }
            | Command::Deposit { national_id, .. }
            | Command::Withdraw { national_id, .. } => national_id,
        }
    }
}
