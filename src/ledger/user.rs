use chrono::NaiveDate;

use crate::ledger::account::Account;
use crate::ledger::error::AccountError;
use crate::ledger::statement::Movement;
use crate::model::{AccountNumber, NationalId, Operation};

/// A registered bank customer.
#[derive(Debug, Clone)]
pub struct User {
    national_id: NationalId,
    full_name: String,
    birth_date: NaiveDate,
    address: String,
    /// Owned accounts, in the order they were linked
    accounts: Vec<AccountNumber>,
}

impl User {
    pub fn new(
        national_id: NationalId,
        full_name: String,
        birth_date: NaiveDate,
        address: String,
    ) -> Self {
        Self {
            national_id,
            full_name,
            birth_date,
            address,
            accounts: Vec::new(),
        }
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    /// The account every operation is dispatched to.
    pub fn first_account(&self) -> Option<AccountNumber> {
        self.accounts.first().copied()
    }

    /// Link an account to this user. Duplicates are not checked.
    pub fn link_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Dispatch `operation` against `account` on behalf of this user.
    pub fn execute_operation<'a>(
        &self,
        account: &'a mut Account,
        operation: Operation,
    ) -> Result<&'a Movement, AccountError> {
        operation.apply(account)
    }
}
