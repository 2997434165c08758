use std::env;
use std::io;
use std::process::ExitCode;

use ledger_sim::Ledger;
use ledger_sim::console::Console;
use ledger_sim::csv::{read_commands, write_accounts};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into()))
        .with_writer(io::stderr)
        .init();

    let mut ledger = Ledger::new();

    let result = match env::args().nth(1) {
        Some(path) => run_script(&mut ledger, path).await,
        None => run_console(ledger).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Drive the interactive menu on the blocking thread pool.
async fn run_console(mut ledger: Ledger) -> io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Console::new(stdin.lock(), stdout.lock()).run(&mut ledger)
    })
    .await
    .map_err(io::Error::other)?
}

/// Replay a csv command script and print the resulting account listing.
async fn run_script(ledger: &mut Ledger, path: String) -> io::Result<()> {
    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let commands = read_commands(path).map_err(io::Error::other)?;
    let (cmd_sender, cmd_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if cmd_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    ledger.run(ReceiverStream::new(cmd_receiver)).await;

    write_accounts(io::stdout().lock(), &ledger.account_summaries()).map_err(io::Error::other)
}
