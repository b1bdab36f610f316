//! `powersafe` command-line tool.

mod cli;
mod commands;
mod scenario;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the worker guard alive until exit so buffered log lines are flushed
    let _log_guard = cli.global.init_logging()?;

    match cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args),
        Commands::Modes(args) => commands::modes::execute(args),
    }
}
