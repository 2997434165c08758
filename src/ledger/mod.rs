//! In-memory banking ledger.
//!
//! The ledger owns every registered user and every account. Commands are
//! dispatched to a user's first account; failures are reported back to the
//! caller and never leave partial state behind.
//! Also supports async stream of commands.

use chrono::NaiveDate;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::model::{AccountNumber, CheckingPolicy, Command, NationalId, Operation};

mod account;
pub use account::Account;

mod statement;
pub use statement::{Movement, Statement};

mod user;
pub use user::User;

mod error;
pub use error::{AccountError, ErrorKind, LedgerError};

/// Settings applied to every account the ledger opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub branch_code: String,
    pub checking: CheckingPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            branch_code: "0001".to_string(),
            checking: CheckingPolicy::default(),
        }
    }
}

/// Movements and balance of a user's account at query time.
#[derive(Debug, Clone)]
pub struct StatementView<'a> {
    pub account: AccountNumber,
    pub movements: &'a [Movement],
    pub balance: Amount,
}

/// One row of the account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub holder: String,
    pub balance: Amount,
}

/// The registry of users and accounts.
pub struct Ledger {
    config: LedgerConfig,
    users: Vec<User>,
    /// Indexed by account number - 1
    accounts: Vec<Account>,
}

/// Public API
impl Ledger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            users: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Run the ledger over the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command must not stop the session, the outcome is logged by `apply`
            let _ = self.apply(command);
        }
    }

    /// Apply a single mutating command on top of the current state
    pub fn apply(&mut self, command: Command) -> Result<(), LedgerError> {
        match command {
            Command::RegisterUser {
                national_id,
                full_name,
                birth_date,
                address,
            } => {
                let result = self
                    .register_user(national_id.clone(), full_name, birth_date, address)
                    .map(|_| ());
                Self::log_result("register", &national_id, None, &result);
                result
            }
            Command::OpenAccount { national_id } => {
                let result = self.create_account(&national_id).map(|_| ());
                Self::log_result("open account", &national_id, None, &result);
                result
            }
            Command::Deposit {
                national_id,
                amount,
            } => {
                let result = self.deposit(&national_id, amount).map(|_| ());
                Self::log_result("deposit", &national_id, Some(amount), &result);
                result
            }
            Command::Withdraw {
                national_id,
                amount,
            } => {
                let result = self.withdraw(&national_id, amount).map(|_| ());
                Self::log_result("withdrawal", &national_id, Some(amount), &result);
                result
            }
        }
    }

    /// Register a new user. National ids must be unique.
    pub fn register_user(
        &mut self,
        national_id: NationalId,
        full_name: String,
        birth_date: NaiveDate,
        address: String,
    ) -> Result<&User, LedgerError> {
        if self.find_user(&national_id).is_some() {
            return Err(LedgerError::DuplicateUser(national_id));
        }

        self.users
            .push(User::new(national_id, full_name, birth_date, address));
        Ok(&self.users[self.users.len() - 1])
    }

    /// Open a checking account for the user and link it as their latest account.
    pub fn create_account(&mut self, national_id: &str) -> Result<AccountNumber, LedgerError> {
        let number = self.next_account_number();
        let user = self
            .users
            .iter_mut()
            .find(|u| u.national_id() == national_id)
            .ok_or_else(|| LedgerError::UserNotFound(national_id.to_string()))?;

        let account = Account::checking(
            number,
            self.config.branch_code.clone(),
            user,
            self.config.checking,
        );
        user.link_account(number);
        self.accounts.push(account);

        Ok(number)
    }

    pub fn deposit(&mut self, national_id: &str, amount: Amount) -> Result<&Movement, LedgerError> {
        self.execute(national_id, Operation::Deposit(amount))
    }

    pub fn withdraw(
        &mut self,
        national_id: &str,
        amount: Amount,
    ) -> Result<&Movement, LedgerError> {
        self.execute(national_id, Operation::Withdrawal(amount))
    }

    /// Dispatch an operation to the user's first account, through the user.
    pub fn execute(
        &mut self,
        national_id: &str,
        operation: Operation,
    ) -> Result<&Movement, LedgerError> {
        let user = self
            .users
            .iter()
            .find(|u| u.national_id() == national_id)
            .ok_or_else(|| LedgerError::UserNotFound(national_id.to_string()))?;

        let account = user
            .first_account()
            .and_then(Self::slot)
            .and_then(|idx| self.accounts.get_mut(idx))
            .ok_or_else(|| LedgerError::NoAccount(national_id.to_string()))?;

        Ok(user.execute_operation(account, operation)?)
    }

    /// Movements and balance of the user's first account.
    pub fn statement(&self, national_id: &str) -> Result<StatementView<'_>, LedgerError> {
        let account = self.first_account_of(national_id)?;
        Ok(StatementView {
            account: account.number(),
            movements: account.statement().movements(),
            balance: account.balance(),
        })
    }

    /// Linear scan by national id. Absence is not an error.
    pub fn find_user(&self, national_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.national_id() == national_id)
    }

    pub fn accounts_of<'a>(&self, user: &'a User) -> &'a [AccountNumber] {
        user.accounts()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        Self::slot(number).and_then(|idx| self.accounts.get(idx))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.iter()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.iter()
    }

    /// Every account in opening order, with its holder's name.
    pub fn account_summaries(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|account| AccountSummary {
                branch: account.branch().to_string(),
                number: account.number(),
                holder: self
                    .find_user(account.owner())
                    .map(|u| u.full_name().to_string())
                    .unwrap_or_default(),
                balance: account.balance(),
            })
            .collect()
    }
}

/// Private API
impl Ledger {
    fn next_account_number(&self) -> AccountNumber {
        self.accounts.len() as AccountNumber + 1
    }

    fn slot(number: AccountNumber) -> Option<usize> {
        (number as usize).checked_sub(1)
    }

    fn first_account_of(&self, national_id: &str) -> Result<&Account, LedgerError> {
        let user = self
            .find_user(national_id)
            .ok_or_else(|| LedgerError::UserNotFound(national_id.to_string()))?;
        user.first_account()
            .and_then(|number| self.account(number))
            .ok_or_else(|| LedgerError::NoAccount(national_id.to_string()))
    }

    /// Small helper to log `apply` results
    fn log_result(
        command: &str,
        national_id: &str,
        amount: Option<Amount>,
        result: &Result<(), LedgerError>,
    ) {
        match (result, amount) {
            (Ok(()), Some(amt)) => {
                info!(national_id, amount = %amt, "{command} applied");
            }
            (Ok(()), None) => {
                info!(national_id, "{command} applied");
            }
            (Err(e), Some(amt)) => {
                info!(national_id, amount = %amt, reason = %e, "{command} rejected");
            }
            (Err(e), None) => {
                info!(national_id, reason = %e, "{command} rejected");
            }
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
