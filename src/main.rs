use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use envgen::{cli::Args, logging, run};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(logging::level_from_args(&args));

    let cwd = match std::env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            error!("could not determine current directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run::run(&args, &cwd) {
        Ok(report) => {
            if report.output.is_none() {
                print!("{}", report.module);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}
