//! Command-line interface layer.
//!
//! Parses arguments, loads the configuration, runs the requested sync and
//! prints a colored report. The library itself never prints.

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use crate::logging;
use commands::{init::init, pull::pull, push::push};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };
    logging::init(args.verbose());

    match args.command {
        Some(Command::Pull(cmd)) => pull(cmd),
        Some(Command::Push(cmd)) => push(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}

/// Print a command failure to stderr.
pub fn report_error(err: &anyhow::Error) {
    report::print_error(err);
}
