use std::process::ExitCode;

use clap::Parser;
use msgsync::cli::{self, Arguments};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            cli::ExitStatus::Error.into()
        }
    }
}
