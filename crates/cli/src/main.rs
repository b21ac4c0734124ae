use std::process::ExitCode;

use clap::Parser;

use ordermill_cli::{execute, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    ordermill_observability::init(cli.verbose());

    if let Err(e) = execute(cli) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
