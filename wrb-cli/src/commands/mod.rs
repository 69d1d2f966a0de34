//! One module per subcommand.

pub mod check_format;
pub mod config;
pub mod manifest;
pub mod open;
pub mod sync;

use std::process::ExitCode;

use colored::Colorize;

use wrb_bridge::BridgeError;
use wrb_core::{Report, Severity};

/// Print `report` and map it to the process exit status: only an
/// error-severity report fails the run.
pub fn print_report(report: &Report) -> ExitCode {
    match report.severity {
        Severity::Info => println!("{} {}", "✓".green().bold(), report.message),
        Severity::Warn => println!("{} {}", "!".yellow().bold(), report.message.yellow()),
        Severity::Error => println!("{} {}", "✗".red().bold(), report.message.red()),
    }
    if report.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Report a bridge outcome. The full error chain goes to the log only.
pub fn finish<T>(result: Result<T, BridgeError>, report: impl FnOnce(&T) -> Report) -> ExitCode {
    match result {
        Ok(outcome) => print_report(&report(&outcome)),
        Err(err) => {
            tracing::debug!(error = ?err, "operation failed");
            print_report(&err.report())
        }
    }
}

/// Printed when another invocation holds the operation lock.
pub fn busy() -> ExitCode {
    print_report(&Report::warn(
        "Another wrb operation is still running. Try again when it finishes.",
    ))
}
