use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::ledger::AccountSummary;
use crate::{Amount, Command};

/// Date format used by scripts and the console (`31-01-1990`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Errors that can occur when reading a command script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command '{command}'")]
    UnrecognizedCommand { line: usize, command: String },

    #[error("line {line}: {command} missing {field}")]
    MissingField {
        line: usize,
        command: String,
        field: &'static str,
    },

    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: invalid birth date '{value}', expected dd-mm-yyyy")]
    InvalidDate { line: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    command: String,
    national_id: String,
    amount: Option<String>,
    full_name: Option<String>,
    birth_date: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    branch: &'a str,
    account: u32,
    holder: &'a str,
    balance: String,
}

/// Read ledger commands from a csv script
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;
    Ok(parse_rows(reader))
}

/// Read ledger commands from any csv source
pub fn read_commands_from(
    source: impl io::Read,
) -> impl Iterator<Item = Result<Command, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);
    parse_rows(reader)
}

fn parse_rows<R: io::Read>(
    reader: csv::Reader<R>,
) -> impl Iterator<Item = Result<Command, CsvError>> {
    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_command(line)
        })
}

impl InputRow {
    fn into_command(self, line: usize) -> Result<Command, CsvError> {
        let command = self.command.to_ascii_lowercase();
        let national_id = self.national_id;
        let require = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CsvError::MissingField {
                    line,
                    command: command.clone(),
                    field,
                })
        };

        match command.as_str() {
            "register" => {
                let full_name = require(self.full_name, "full_name")?;
                let raw_date = require(self.birth_date, "birth_date")?;
                let address = require(self.address, "address")?;
                let birth_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
                    .map_err(|_| CsvError::InvalidDate {
                        line,
                        value: raw_date.clone(),
                    })?;
                Ok(Command::RegisterUser {
                    national_id,
                    full_name,
                    birth_date,
                    address,
                })
            }
            "open" => Ok(Command::OpenAccount { national_id }),
            "deposit" | "withdraw" => {
                let raw = require(self.amount, "amount")?;
                let amount: Amount = raw
                    .parse()
                    .map_err(|_| CsvError::InvalidAmount { line, value: raw })?;
                if command == "deposit" {
                    Ok(Command::Deposit {
                        national_id,
                        amount,
                    })
                } else {
                    Ok(Command::Withdraw {
                        national_id,
                        amount,
                    })
                }
            }
            _ => Err(CsvError::UnrecognizedCommand {
                line,
                command: self.command,
            }),
        }
    }
}

/// Write the account listing in csv format
pub fn write_accounts<'a>(
    writer: impl io::Write,
    accounts: impl IntoIterator<Item = &'a AccountSummary>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for summary in accounts {
        writer.serialize(OutputRow {
            branch: &summary.branch,
            account: summary.number,
            holder: &summary.holder,
            balance: summary.balance.to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
