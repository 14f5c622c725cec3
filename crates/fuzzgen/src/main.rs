//! fuzzgen CLI - scaffold fuzzing harness projects
//!
//! This is the main entry point for the fuzzgen command-line interface.

mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use fuzzgen_scaffold::Error as ScaffoldError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match commands::new::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print an error, with the usage line for argument errors
fn report_error(err: &anyhow::Error) {
    output::error(&format!("{:#}", err));

    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::InvalidKind { available, .. }) => {
            output::hint(&format!("Please specify fuzzer kind: {}", available));
            output::hint(&Cli::command().render_usage().to_string());
        }
        Some(e) if e.is_usage_error() => {
            output::hint(&Cli::command().render_usage().to_string());
        }
        _ => {}
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
