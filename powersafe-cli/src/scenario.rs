//! Scenario files and the simulated device they run against.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, bail};
use powersafe::{Device, Guard, GuardOptions, GuardStatus, Mode, Mount, PowersafeError, WriteTransaction};
use serde::{Deserialize, Serialize};

/// A scripted sequence of guard operations.
///
/// ```yaml
/// options: { initial_mode: normal, label: sd }
/// device: { fail_mounts: 1 }
/// steps:
///   - { op: mount, id: a, forced: false }
///   - { op: write, id: w }
///   - { op: set_mode, mode: eager_unmount }
///   - { op: end_write, id: w }
///   - { op: release, id: a }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub options: GuardOptions,
    #[serde(default)]
    pub device: DeviceSpec,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    /// Refuse this many mount calls before accepting.
    #[serde(default)]
    pub fail_mounts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Mount {
        id: String,
        #[serde(default)]
        forced: bool,
    },
    Write {
        id: String,
        #[serde(default)]
        forced: bool,
    },
    Release {
        id: String,
    },
    EndWrite {
        id: String,
    },
    SetMode {
        mode: Mode,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forced_suffix = |forced: &bool| if *forced { " (forced)" } else { "" };
        match self {
            Step::Mount { id, forced } => write!(f, "mount {}{}", id, forced_suffix(forced)),
            Step::Write { id, forced } => write!(f, "write {}{}", id, forced_suffix(forced)),
            Step::Release { id } => write!(f, "release {}", id),
            Step::EndWrite { id } => write!(f, "end_write {}", id),
            Step::SetMode { mode } => write!(f, "set_mode {}", mode),
        }
    }
}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)
            .map_err(|e| PowersafeError::Config(format!("invalid scenario: {}", e)))?;
        scenario.options.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("in scenario {}", path.display()))
    }
}

// ============================================================================
// SIMULATED DEVICE
// ============================================================================

/// In-memory device that logs its calls and refuses the first N mounts.
#[derive(Debug, Default)]
pub struct SimulatedDevice {
    remaining_failures: AtomicUsize,
    mounts: AtomicUsize,
    unmounts: AtomicUsize,
}

impl SimulatedDevice {
    pub fn new(spec: &DeviceSpec) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(spec.fail_mounts),
            ..Default::default()
        }
    }

    pub fn mount_calls(&self) -> usize {
        self.mounts.load(Ordering::Relaxed)
    }

    pub fn unmount_calls(&self) -> usize {
        self.unmounts.load(Ordering::Relaxed)
    }
}

impl Device for SimulatedDevice {
    fn mount(&self) -> bool {
        self.mounts.fetch_add(1, Ordering::Relaxed);
        let refused = self
            .remaining_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();
        tracing::debug!(refused, "Simulated device mount");
        !refused
    }

    fn unmount(&self) {
        self.unmounts.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Simulated device unmount");
    }
}

// ============================================================================
// RUNNER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Granted,
    Denied,
    Ok,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Granted => "granted",
            Outcome::Denied => "denied",
            Outcome::Ok => "ok",
        };
        f.write_str(s)
    }
}

impl From<bool> for Outcome {
    fn from(granted: bool) -> Self {
        if granted {
            Outcome::Granted
        } else {
            Outcome::Denied
        }
    }
}

/// Guard state observed right after one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: String,
    pub outcome: Outcome,
    #[serde(flatten)]
    pub status: GuardStatus,
    pub device_mounts: usize,
    pub device_unmounts: usize,
}

/// Apply every step in order. Handles still held at the end are dropped and
/// reported as a final row.
pub fn run(scenario: &Scenario) -> anyhow::Result<Vec<StepReport>> {
    let device = Arc::new(SimulatedDevice::new(&scenario.device));
    let guard = Guard::with_options(device.clone(), scenario.options.clone());

    let mut mounts: HashMap<String, Mount<'_>> = HashMap::new();
    let mut writes: HashMap<String, WriteTransaction<'_>> = HashMap::new();
    let mut reports = Vec::with_capacity(scenario.steps.len() + 1);

    let report = |step: usize, action: String, outcome: Outcome| StepReport {
        step,
        action,
        outcome,
        status: guard.status(),
        device_mounts: device.mount_calls(),
        device_unmounts: device.unmount_calls(),
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        let number = index + 1;
        let outcome = match step {
            Step::Mount { id, forced } => {
                if mounts.contains_key(id) {
                    bail!("step {}: mount id `{}` is already held", number, id);
                }
                let mount = guard.mount(*forced);
                let outcome = Outcome::from(mount.mounted());
                mounts.insert(id.clone(), mount);
                outcome
            }
            Step::Write { id, forced } => {
                if writes.contains_key(id) {
                    bail!("step {}: write id `{}` is already held", number, id);
                }
                let write = guard.write(*forced);
                let outcome = Outcome::from(write.active());
                writes.insert(id.clone(), write);
                outcome
            }
            Step::Release { id } => {
                if mounts.remove(id).is_none() {
                    bail!("step {}: no mount with id `{}`", number, id);
                }
                Outcome::Ok
            }
            Step::EndWrite { id } => {
                if writes.remove(id).is_none() {
                    bail!("step {}: no write with id `{}`", number, id);
                }
                Outcome::Ok
            }
            Step::SetMode { mode } => {
                guard.set_mode(*mode);
                Outcome::Ok
            }
        };
        tracing::info!(step = number, action = %step, outcome = %outcome, "Applied step");
        reports.push(report(number, step.to_string(), outcome));
    }

    let leftover = writes.len() + mounts.len();
    if leftover > 0 {
        // Writes first, the way a well-behaved caller unwinds
        writes.clear();
        mounts.clear();
        reports.push(report(
            scenario.steps.len() + 1,
            format!("drop {} remaining handle(s)", leftover),
            Outcome::Ok,
        ));
    }

    Ok(reports)
}
