use std::{io, process::ExitCode};

use colored::Colorize;
use matrix_calculator::{settings::CalculatorSettings, shell::Shell};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let settings = CalculatorSettings::from_env();
    let mut shell = Shell::new(
        io::stdin().lock(),
        io::stdout().lock(),
        rand::thread_rng(),
        settings,
    );

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
