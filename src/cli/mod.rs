use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, Command};

mod args;
mod report;
mod run;

/// Exit status for CLI commands, following the usual linter convention.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing out of sync.
    Success,
    /// Command completed but found keys needing attention.
    Failure,
    /// Command failed on an internal error (config error, I/O error, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let base_dir = std::env::current_dir()?;
    // with_command_or_help guarantees a command here
    let command = args.command.expect("command is present");
    run::run(command, &base_dir)
}
