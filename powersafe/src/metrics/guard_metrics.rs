//! Per-guard metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Storage for per-guard metrics.
///
/// Owned by the `Guard`, outside its state lock.
/// All counters are monotonic (never decrease).
#[derive(Default, Debug)]
pub struct GuardMetricsStorage {
    /// Mode transitions that actually changed the mode
    pub(crate) mode_changes: AtomicU64,
    /// Successful physical mounts
    pub(crate) device_mounts: AtomicU64,
    /// Physical mount attempts refused by the device
    pub(crate) device_mount_failures: AtomicU64,
    /// Physical unmounts
    pub(crate) device_unmounts: AtomicU64,
    /// Mount handles that were granted
    pub(crate) mounts_granted: AtomicU64,
    /// Mount handles that were denied (policy or device failure)
    pub(crate) mounts_denied: AtomicU64,
    /// Write transactions that were granted
    pub(crate) writes_granted: AtomicU64,
    /// Write transactions that were denied
    pub(crate) writes_denied: AtomicU64,
}

impl GuardMetricsStorage {
    /// Create new per-guard metrics storage.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn increment_mode_changes(&self) {
        self.mode_changes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a physical mount attempt.
    pub(crate) fn record_device_mount(&self, success: bool) {
        if success {
            self.device_mounts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.device_mount_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn increment_device_unmounts(&self) {
        self.device_unmounts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a mount request.
    pub(crate) fn record_mount(&self, granted: bool) {
        if granted {
            self.mounts_granted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.mounts_denied.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the outcome of a write request.
    pub(crate) fn record_write(&self, granted: bool) {
        if granted {
            self.writes_granted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.writes_denied.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Snapshot of per-guard metrics at query time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GuardMetrics {
    pub mode_changes_total: u64,
    pub device_mounts_total: u64,
    pub device_mount_failures_total: u64,
    pub device_unmounts_total: u64,
    pub mounts_granted_total: u64,
    pub mounts_denied_total: u64,
    pub writes_granted_total: u64,
    pub writes_denied_total: u64,
}

impl GuardMetrics {
    /// Create snapshot from storage.
    pub(crate) fn from_storage(storage: &GuardMetricsStorage) -> Self {
        Self {
            mode_changes_total: storage.mode_changes.load(Ordering::Relaxed),
            device_mounts_total: storage.device_mounts.load(Ordering::Relaxed),
            device_mount_failures_total: storage.device_mount_failures.load(Ordering::Relaxed),
            device_unmounts_total: storage.device_unmounts.load(Ordering::Relaxed),
            mounts_granted_total: storage.mounts_granted.load(Ordering::Relaxed),
            mounts_denied_total: storage.mounts_denied.load(Ordering::Relaxed),
            writes_granted_total: storage.writes_granted.load(Ordering::Relaxed),
            writes_denied_total: storage.writes_denied.load(Ordering::Relaxed),
        }
    }
}
