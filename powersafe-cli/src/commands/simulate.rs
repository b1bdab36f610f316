use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::scenario::{self, Scenario, StepReport};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the YAML scenario
    pub scenario: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "STEP")]
    step: usize,
    #[tabled(rename = "ACTION")]
    action: String,
    #[tabled(rename = "OUTCOME")]
    outcome: String,
    #[tabled(rename = "MODE")]
    mode: String,
    #[tabled(rename = "MOUNTED")]
    mounted: bool,
    #[tabled(rename = "MOUNTS")]
    mounts: String,
    #[tabled(rename = "WRITES")]
    writes: String,
    #[tabled(rename = "DEVICE MOUNT/UNMOUNT")]
    device_calls: String,
}

impl From<&StepReport> for StepRow {
    fn from(report: &StepReport) -> Self {
        let status = &report.status;
        Self {
            step: report.step,
            action: report.action.clone(),
            outcome: report.outcome.to_string(),
            mode: status.mode.to_string(),
            mounted: status.mounted,
            mounts: format!("{} ({} forced)", status.pending_mounts, status.forced_mounts),
            writes: format!("{} ({} forced)", status.pending_writes, status.forced_writes),
            device_calls: format!("{}/{}", report.device_mounts, report.device_unmounts),
        }
    }
}

pub fn execute(args: SimulateArgs) -> anyhow::Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    tracing::debug!(
        scenario = %args.scenario.display(),
        steps = scenario.steps.len(),
        "Running scenario"
    );

    let reports = scenario::run(&scenario)?;

    match args.format {
        OutputFormat::Table => {
            let rows: Vec<StepRow> = reports.iter().map(StepRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::blank());
            println!("{}", table);
        }
        OutputFormat::Json => {
            for report in &reports {
                println!("{}", serde_json::to_string(report)?);
            }
        }
    }
    Ok(())
}
