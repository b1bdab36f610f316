//! Test doubles for powersafe.
//!
//! [`RecordingDevice`] stands in for real storage: it counts calls, keeps an
//! ordered event log, tracks whether it is physically mounted, and can be
//! told to refuse mounts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use powersafe::{Device, Guard, GuardOptions, Mode};

/// One call observed by a [`RecordingDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Mounted,
    MountRefused,
    Unmounted,
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    mount_calls: AtomicUsize,
    unmount_calls: AtomicUsize,
    refuse_mounts: AtomicBool,
    /// Number of upcoming mount calls to refuse before accepting again.
    refuse_next: AtomicUsize,
    physically_mounted: AtomicBool,
    /// Mount on an already mounted device, or unmount on an unmounted one.
    redundant_calls: AtomicUsize,
    events: Mutex<Vec<DeviceEvent>>,
}

impl RecordingDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Device that refuses every mount until told otherwise.
    pub fn refusing() -> Arc<Self> {
        let device = Self::new();
        device.set_refuse_mounts(true);
        device
    }

    pub fn set_refuse_mounts(&self, refuse: bool) {
        self.refuse_mounts.store(refuse, Ordering::SeqCst);
    }

    /// Refuse the next `count` mount calls, then accept again.
    pub fn refuse_next(&self, count: usize) {
        self.refuse_next.store(count, Ordering::SeqCst);
    }

    pub fn mount_calls(&self) -> usize {
        self.mount_calls.load(Ordering::SeqCst)
    }

    pub fn unmount_calls(&self) -> usize {
        self.unmount_calls.load(Ordering::SeqCst)
    }

    /// `(mount_calls, unmount_calls)`
    pub fn calls(&self) -> (usize, usize) {
        (self.mount_calls(), self.unmount_calls())
    }

    pub fn is_physically_mounted(&self) -> bool {
        self.physically_mounted.load(Ordering::SeqCst)
    }

    pub fn redundant_calls(&self) -> usize {
        self.redundant_calls.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.events.lock().clone()
    }

    fn take_refusal(&self) -> bool {
        if self.refuse_mounts.load(Ordering::SeqCst) {
            return true;
        }
        self.refuse_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Device for RecordingDevice {
    fn mount(&self) -> bool {
        self.mount_calls.fetch_add(1, Ordering::SeqCst);
        if self.is_physically_mounted() {
            self.redundant_calls.fetch_add(1, Ordering::SeqCst);
        }
        if self.take_refusal() {
            self.events.lock().push(DeviceEvent::MountRefused);
            return false;
        }
        self.physically_mounted.store(true, Ordering::SeqCst);
        self.events.lock().push(DeviceEvent::Mounted);
        true
    }

    fn unmount(&self) {
        self.unmount_calls.fetch_add(1, Ordering::SeqCst);
        if !self.physically_mounted.swap(false, Ordering::SeqCst) {
            self.redundant_calls.fetch_add(1, Ordering::SeqCst);
        }
        self.events.lock().push(DeviceEvent::Unmounted);
    }
}

/// Guard in `mode` over a fresh [`RecordingDevice`].
pub fn recording_guard(mode: Mode) -> (Guard, Arc<RecordingDevice>) {
    let device = RecordingDevice::new();
    let options = GuardOptions {
        initial_mode: mode,
        ..Default::default()
    };
    let guard = Guard::with_options(device.clone(), options);
    (guard, device)
}

/// Assert the guard's counters obey their ordering invariants.
pub fn assert_counter_invariants(guard: &Guard) {
    let status = guard.status();
    assert!(
        status.forced_mounts <= status.pending_mounts,
        "forced mounts {} exceed pending mounts {}",
        status.forced_mounts,
        status.pending_mounts
    );
    assert!(
        status.forced_writes <= status.pending_writes,
        "forced writes {} exceed pending writes {}",
        status.forced_writes,
        status.pending_writes
    );
}
