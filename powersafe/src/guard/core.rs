//! The guard: mode state machine plus mount/write admission control.

use std::sync::Arc;

use parking_lot::Mutex;

use super::mode::Mode;
use super::state::{GuardState, GuardStatus};
use crate::device::Device;
use crate::handles::{Mount, WriteTransaction};
use crate::metrics::{GuardMetrics, GuardMetricsStorage};
use crate::options::GuardOptions;

/// Arbitrates access to a [`Device`] that must not be left mid-write.
///
/// **Locking Strategy**: a single `parking_lot::Mutex` protects the mode, the
/// mounted flag and all reference counts. Every operation takes it once and
/// never waits on anything else; denied requests return immediately.
/// Device calls run with the lock held.
///
/// Typical usage:
///
/// ```rust
/// use powersafe::{FnDevice, Guard, Mode};
/// use std::sync::Arc;
///
/// let guard = Guard::new(Arc::new(FnDevice::new(|| true, || {})));
///
/// let mount = guard.mount(false);
/// if mount.mounted() {
///     // Reads are safe here.
///     let write = guard.write(false);
///     if write.active() {
///         // Writes are safe here.
///     }
/// }
///
/// guard.set_mode(Mode::Shutdown);
/// assert!(!guard.mount(true).mounted());
/// ```
pub struct Guard {
    device: Arc<dyn Device>,
    state: Mutex<GuardState>,
    metrics: GuardMetricsStorage,
    options: GuardOptions,
}

impl Guard {
    /// Create a guard in `Normal` mode with the device unmounted.
    pub fn new(device: Arc<dyn Device>) -> Self {
        Self::with_options(device, GuardOptions::default())
    }

    /// Create a guard with explicit options. The device starts unmounted
    /// regardless of the initial mode.
    pub fn with_options(device: Arc<dyn Device>, options: GuardOptions) -> Self {
        tracing::debug!(
            label = %options.label,
            mode = %options.initial_mode,
            "Created filesystem guard"
        );
        Self {
            device,
            state: Mutex::new(GuardState::new(options.initial_mode)),
            metrics: GuardMetricsStorage::new(),
            options,
        }
    }

    // ========================================================================
    // PUBLIC API
    // ========================================================================

    /// Request that the device be mounted for the lifetime of the handle.
    pub fn mount(&self, forced: bool) -> Mount<'_> {
        Mount::new(self, forced)
    }

    /// Signal intent to write for the lifetime of the handle.
    ///
    /// Hold a [`Mount`] for at least as long as the transaction; the guard
    /// only checks that the device is mounted when the write begins.
    pub fn write(&self, forced: bool) -> WriteTransaction<'_> {
        WriteTransaction::new(self, forced)
    }

    pub fn mode(&self) -> Mode {
        self.state.lock().mode
    }

    /// Switch to `mode`, mounting or unmounting the device as the transition
    /// requires. Setting the current mode again does nothing.
    pub fn set_mode(&self, mode: Mode) {
        let mut state = self.state.lock();
        if state.mode == mode {
            return;
        }

        let from = state.mode;
        self.exit_action(&mut state, from);
        self.entry_action(&mut state, mode);
        state.mode = mode;
        self.metrics.increment_mode_changes();

        tracing::info!(
            label = %self.options.label,
            from = %from,
            to = %mode,
            mounted = state.mounted,
            pending_mounts = state.mount_count,
            "Guard mode changed"
        );
    }

    /// Whether the device is physically mounted.
    ///
    /// In `Normal` mode this may be true with no pending mounts. It is false
    /// right after entering `Disabled`, even while mount handles are alive.
    pub fn is_mounted(&self) -> bool {
        self.state.lock().mounted
    }

    /// Number of live, granted [`Mount`] handles.
    pub fn pending_mounts(&self) -> usize {
        self.state.lock().mount_count
    }

    /// Number of live, granted [`WriteTransaction`] handles.
    pub fn pending_writes(&self) -> usize {
        self.state.lock().write_count
    }

    /// Snapshot of mode, mounted flag and all counters at one instant.
    pub fn status(&self) -> GuardStatus {
        GuardStatus::from(&*self.state.lock())
    }

    pub fn metrics(&self) -> GuardMetrics {
        GuardMetrics::from_storage(&self.metrics)
    }

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    // ========================================================================
    // HANDLE PRIMITIVES
    // ========================================================================

    pub(crate) fn try_mount(&self, forced: bool) -> bool {
        let mut state = self.state.lock();
        if !state.mode.admits(forced) {
            tracing::trace!(
                label = %self.options.label,
                mode = %state.mode,
                forced,
                "Mount denied by mode"
            );
            self.metrics.record_mount(false);
            return false;
        }

        if !state.mounted {
            self.physical_mount(&mut state);
        }
        if state.mounted {
            state.add_mount(forced);
        }
        self.metrics.record_mount(state.mounted);
        state.mounted
    }

    pub(crate) fn release_mount(&self, forced: bool) {
        let mut state = self.state.lock();
        state.remove_mount(forced);
        tracing::trace!(
            label = %self.options.label,
            forced,
            pending_mounts = state.mount_count,
            "Mount released"
        );
        if state.mode.unmounts_when_idle() {
            self.unmount_if_idle(&mut state);
        }
    }

    pub(crate) fn try_begin_write(&self, forced: bool) -> bool {
        let mut state = self.state.lock();
        if !state.mounted {
            tracing::trace!(label = %self.options.label, forced, "Write denied, not mounted");
            self.metrics.record_write(false);
            return false;
        }
        if !state.mode.admits(forced) {
            tracing::trace!(
                label = %self.options.label,
                mode = %state.mode,
                forced,
                "Write denied by mode"
            );
            self.metrics.record_write(false);
            return false;
        }

        state.add_write(forced);
        self.metrics.record_write(true);
        true
    }

    pub(crate) fn end_write(&self, forced: bool) {
        let mut state = self.state.lock();
        state.remove_write(forced);
        tracing::trace!(
            label = %self.options.label,
            forced,
            pending_writes = state.write_count,
            "Write ended"
        );
    }

    // ========================================================================
    // MODE TRANSITIONS
    // ========================================================================

    /// Side effects of leaving `mode`.
    fn exit_action(&self, state: &mut GuardState, mode: Mode) {
        match mode {
            // Unmount was being deferred until the last release; settle it now.
            Mode::EagerUnmount => self.unmount_if_idle(state),
            Mode::Normal | Mode::LameDuck | Mode::Shutdown | Mode::Disabled => {}
        }
    }

    /// Side effects of entering `mode`.
    fn entry_action(&self, state: &mut GuardState, mode: Mode) {
        match mode {
            Mode::Normal => {
                if !state.mounted && state.mount_count > 0 {
                    self.physical_mount(state);
                }
            }
            Mode::EagerUnmount => {}
            Mode::LameDuck => {
                // Forced holders keep their access; everybody else loses it.
                if !state.mounted && state.forced_mount_count > 0 {
                    self.physical_mount(state);
                }
                self.unmount_if_idle(state);
            }
            Mode::Shutdown => self.unmount_if_idle(state),
            Mode::Disabled => {
                if state.mounted {
                    tracing::warn!(
                        label = %self.options.label,
                        pending_mounts = state.mount_count,
                        pending_writes = state.write_count,
                        "Force unmounting device"
                    );
                    self.physical_unmount(state);
                }
            }
        }
    }

    // ========================================================================
    // DEVICE CALLS (lock held)
    // ========================================================================

    fn physical_mount(&self, state: &mut GuardState) {
        state.mounted = self.device.mount();
        self.metrics.record_device_mount(state.mounted);
        if state.mounted {
            tracing::debug!(label = %self.options.label, "Mounted device");
        } else {
            tracing::warn!(label = %self.options.label, "Device refused to mount");
        }
    }

    fn physical_unmount(&self, state: &mut GuardState) {
        self.device.unmount();
        state.mounted = false;
        self.metrics.increment_device_unmounts();
        tracing::debug!(label = %self.options.label, "Unmounted device");
    }

    fn unmount_if_idle(&self, state: &mut GuardState) {
        if state.is_idle_mounted() {
            self.physical_unmount(state);
        }
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("label", &self.options.label)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
