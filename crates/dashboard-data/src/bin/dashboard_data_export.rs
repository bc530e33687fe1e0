//! Export a synthetic dashboard dataset as CSV.
//!
//! This binary delegates to `dashboard_data::export_cli` for parsing and
//! export logic, keeping the CLI behaviour testable without spawning a
//! process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use dashboard_data::export_cli::{
    CliError, ParseOutcome, USAGE, parse_args, run_export, success_message,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => write_stdout(USAGE.trim_end()),
        ParseOutcome::Options(options) => {
            let export = run_export(&options)?;
            write_stdout(&success_message(&export));
        }
    }
    Ok(())
}

fn write_stdout(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}
