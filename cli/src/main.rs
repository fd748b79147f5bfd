mod cli;
mod commands;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::check;

/// Map the `-v` count to a default log level; `RUST_LOG` takes precedence.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<ExitCode> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Check(args) => check::run(&cli, args),
    }
}

fn main() -> anyhow::Result<ExitCode> { run() }
