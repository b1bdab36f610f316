use std::path::PathBuf;

use clap::{Parser, Subcommand};
use powersafe::constants;
use powersafe::util::{self, WorkerGuard};

use crate::commands::modes::ModesArgs;
use crate::commands::simulate::SimulateArgs;

/// Powersafe - replay mount/write scenarios against a filesystem guard
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug)]
pub struct GlobalFlags {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "powersafe=trace")
    #[arg(long, global = true, default_value = constants::logging::DEFAULT_FILTER)]
    pub log_level: String,

    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long, global = true, env = "POWERSAFE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl GlobalFlags {
    pub fn init_logging(&self) -> anyhow::Result<Option<WorkerGuard>> {
        match &self.log_dir {
            Some(dir) => Ok(Some(util::init_file_logging(dir, &self.log_level)?)),
            None => {
                util::init_logging(&self.log_level)?;
                Ok(None)
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a YAML scenario against a simulated device
    Simulate(SimulateArgs),

    /// Show the admission policy of every mode
    Modes(ModesArgs),
}
