use crate::Amount;
use crate::ledger::error::AccountError;
use crate::ledger::statement::{Movement, Statement};
use crate::ledger::user::User;
use crate::model::{AccountNumber, CheckingPolicy, MovementKind, NationalId, Operation};

/// A bank account with its balance and movement history.
///
/// Accounts carrying a [`CheckingPolicy`] are checking accounts: their
/// withdrawals are additionally capped per transaction and in count.
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    owner: NationalId,
    balance: Amount,
    statement: Statement,
    checking: Option<CheckingPolicy>,
}

impl Account {
    /// Create an empty plain account owned by `owner`.
    pub fn open(number: AccountNumber, branch: impl Into<String>, owner: &User) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner: owner.national_id().to_string(),
            balance: Amount::ZERO,
            statement: Statement::new(),
            checking: None,
        }
    }

    /// Create an empty checking account owned by `owner`.
    pub fn checking(
        number: AccountNumber,
        branch: impl Into<String>,
        owner: &User,
        policy: CheckingPolicy,
    ) -> Self {
        Self {
            checking: Some(policy),
            ..Self::open(number, branch, owner)
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// National id of the owning user.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn checking_policy(&self) -> Option<&CheckingPolicy> {
        self.checking.as_ref()
    }

    /// Increase the balance. Does not record a movement.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                balance: self.balance,
                requested: amount,
            })?;
        Ok(())
    }

    /// Decrease the balance. Does not record a movement.
    ///
    /// Checks run in order: checking limit, checking count, then the base
    /// amount and balance checks.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), AccountError> {
        if let Some(policy) = &self.checking {
            if amount > policy.per_withdrawal_limit {
                return Err(AccountError::LimitExceeded {
                    limit: policy.per_withdrawal_limit,
                    requested: amount,
                });
            }
            if self.statement.count(MovementKind::Withdrawal) >= policy.max_withdrawals {
                return Err(AccountError::TooManyWithdrawals(policy.max_withdrawals));
            }
        }

        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

impl Operation {
    /// Apply the operation to `account`, recording a movement on success.
    ///
    /// A failed application leaves both balance and statement untouched.
    pub fn apply<'a>(&self, account: &'a mut Account) -> Result<&'a Movement, AccountError> {
        match *self {
            Operation::Deposit(amount) => account.deposit(amount)?,
            Operation::Withdrawal(amount) => account.withdraw(amount)?,
        }
        Ok(account.statement.record(self.kind(), self.amount()))
    }
}
