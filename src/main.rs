//! jira-board - print JIRA sprint boards and issues in the terminal.
//!
//! Reads the tracker URL and credentials from the environment, performs a
//! handful of sequential REST calls and prints the result.

mod api;
mod cli;
mod config;
mod error;
mod logging;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(cli::exit_code_for(&e, &mut std::io::stdout())),
    };

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    let result = cli.run().await;
    tracing::info!(success = result.is_ok(), "jira-board finished");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            if let Some(hint) = e.suggested_action() {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
