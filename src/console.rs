//! Interactive text menu driving a [`Ledger`].
//!
//! The console only parses raw input and renders results; every rule lives in
//! the ledger. Invalid input is reported and the menu is shown again.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::csv::DATE_FORMAT;
use crate::ledger::{LedgerError, Movement};
use crate::{Amount, Ledger, Operation};

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[w]\tWithdraw
[x]\tStatement
[na]\tNew account
[la]\tList accounts
[nu]\tNew user
[q]\tQuit
=> ";

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    Statement,
    NewAccount,
    ListAccounts,
    NewUser,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "d" => Some(MenuChoice::Deposit),
            "w" => Some(MenuChoice::Withdraw),
            "x" => Some(MenuChoice::Statement),
            "na" => Some(MenuChoice::NewAccount),
            "la" => Some(MenuChoice::ListAccounts),
            "nu" => Some(MenuChoice::NewUser),
            "q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Line-oriented console over any input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu until the user quits or input ends.
    pub fn run(&mut self, ledger: &mut Ledger) -> io::Result<()> {
        loop {
            let Some(line) = self.prompt(MENU)? else {
                break;
            };

            let choice = MenuChoice::parse(&line);
            debug!(?choice, "menu choice");

            match choice {
                Some(MenuChoice::Deposit) => self.operation(ledger, OperationKind::Deposit)?,
                Some(MenuChoice::Withdraw) => self.operation(ledger, OperationKind::Withdrawal)?,
                Some(MenuChoice::Statement) => self.statement(ledger)?,
                Some(MenuChoice::NewAccount) => self.new_account(ledger)?,
                Some(MenuChoice::ListAccounts) => self.list_accounts(ledger)?,
                Some(MenuChoice::NewUser) => self.new_user(ledger)?,
                Some(MenuChoice::Quit) => break,
                None => self.error("unknown option, try again")?,
            }
        }
        self.output.flush()
    }

    fn operation(&mut self, ledger: &mut Ledger, kind: OperationKind) -> io::Result<()> {
        let Some(national_id) = self.prompt("National ID: ")? else {
            return Ok(());
        };
        if ledger.find_user(&national_id).is_none() {
            return self.error(LedgerError::UserNotFound(national_id));
        }

        let label = match kind {
            OperationKind::Deposit => "Deposit amount: ",
            OperationKind::Withdrawal => "Withdrawal amount: ",
        };
        let Some(raw) = self.prompt(label)? else {
            return Ok(());
        };
        let amount: Amount = match raw.parse() {
            Ok(amount) => amount,
            Err(e) => return self.error(e),
        };

        let operation = match kind {
            OperationKind::Deposit => Operation::Deposit(amount),
            OperationKind::Withdrawal => Operation::Withdrawal(amount),
        };
        match ledger.execute(&national_id, operation) {
            Ok(movement) => {
                let (kind, amount) = (movement.kind(), movement.amount());
                writeln!(self.output, "\n{kind} of {amount} completed.")
            }
            Err(e) => self.error(e),
        }
    }

    fn statement(&mut self, ledger: &Ledger) -> io::Result<()> {
        let Some(national_id) = self.prompt("National ID: ")? else {
            return Ok(());
        };
        let view = match ledger.statement(&national_id) {
            Ok(view) => view,
            Err(e) => return self.error(e),
        };

        writeln!(self.output, "\n=========== STATEMENT ===========")?;
        if view.movements.is_empty() {
            writeln!(self.output, "No movements recorded.")?;
        }
        for movement in view.movements {
            write_movement(&mut self.output, movement)?;
        }
        writeln!(self.output, "\nBalance:\n\t{}", view.balance)?;
        writeln!(self.output, "=================================")
    }

    fn new_user(&mut self, ledger: &mut Ledger) -> io::Result<()> {
        let Some(national_id) = self.prompt("National ID (digits only): ")? else {
            return Ok(());
        };
        if ledger.find_user(&national_id).is_some() {
            return self.error(LedgerError::DuplicateUser(national_id));
        }

        let Some(full_name) = self.prompt("Full name: ")? else {
            return Ok(());
        };
        let Some(raw_date) = self.prompt("Birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let Ok(birth_date) = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT) else {
            return self.error(format!("invalid birth date '{raw_date}'"));
        };
        let Some(address) = self.prompt("Address (street, number - district - city/state): ")?
        else {
            return Ok(());
        };

        match ledger.register_user(national_id, full_name, birth_date, address) {
            Ok(_) => writeln!(self.output, "\nUser registered."),
            Err(e) => self.error(e),
        }
    }

    fn new_account(&mut self, ledger: &mut Ledger) -> io::Result<()> {
        let Some(national_id) = self.prompt("National ID: ")? else {
            return Ok(());
        };
        match ledger.create_account(&national_id) {
            Ok(number) => writeln!(self.output, "\nAccount {number} created."),
            Err(e) => self.error(e),
        }
    }

    fn list_accounts(&mut self, ledger: &Ledger) -> io::Result<()> {
        let summaries = ledger.account_summaries();
        if summaries.is_empty() {
            return writeln!(self.output, "\nNo accounts opened.");
        }
        for summary in summaries {
            writeln!(self.output, "{}", "=".repeat(40))?;
            writeln!(self.output, "Branch:\t\t{}", summary.branch)?;
            writeln!(self.output, "Account:\t{}", summary.number)?;
            writeln!(self.output, "Holder:\t\t{}", summary.holder)?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn error(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "\n! {message}")
    }
}

#[derive(Debug, Clone, Copy)]
enum OperationKind {
    Deposit,
    Withdrawal,
}

fn write_movement(out: &mut impl Write, movement: &Movement) -> io::Result<()> {
    writeln!(
        out,
        "{}:\n\t{}\t{}",
        movement.kind(),
        movement.amount(),
        movement.timestamp().format(TIMESTAMP_FORMAT)
    )
}
