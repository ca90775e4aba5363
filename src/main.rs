use std::process::ExitCode;

use clap::Parser;
use transync::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match transync::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            transync::cli::report_error(&err);
            ExitStatus::Error.into()
        }
    }
}
