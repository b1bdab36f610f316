//! Guard bookkeeping: mode, mounted flag, and reference counts.

use serde::Serialize;

use super::mode::Mode;

/// Mutable guard state. Only ever touched with the guard's lock held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GuardState {
    pub(crate) mode: Mode,
    /// Whether the device is physically mounted right now.
    pub(crate) mounted: bool,
    pub(crate) mount_count: usize,
    pub(crate) forced_mount_count: usize,
    pub(crate) write_count: usize,
    pub(crate) forced_write_count: usize,
}

impl GuardState {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub(crate) fn add_mount(&mut self, forced: bool) {
        self.mount_count += 1;
        if forced {
            self.forced_mount_count += 1;
        }
    }

    pub(crate) fn remove_mount(&mut self, forced: bool) {
        debug_assert!(self.mount_count > 0, "mount released more often than granted");
        self.mount_count -= 1;
        if forced {
            debug_assert!(self.forced_mount_count > 0);
            self.forced_mount_count -= 1;
        }
    }

    pub(crate) fn add_write(&mut self, forced: bool) {
        self.write_count += 1;
        if forced {
            self.forced_write_count += 1;
        }
    }

    pub(crate) fn remove_write(&mut self, forced: bool) {
        debug_assert!(self.write_count > 0, "write ended more often than begun");
        self.write_count -= 1;
        if forced {
            debug_assert!(self.forced_write_count > 0);
            self.forced_write_count -= 1;
        }
    }

    /// Mounted with no mount handles left.
    pub(crate) fn is_idle_mounted(&self) -> bool {
        self.mounted && self.mount_count == 0
    }
}

/// Consistent snapshot of a guard, taken under one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardStatus {
    pub mode: Mode,
    pub mounted: bool,
    pub pending_mounts: usize,
    pub forced_mounts: usize,
    pub pending_writes: usize,
    pub forced_writes: usize,
}

impl From<&GuardState> for GuardStatus {
    fn from(state: &GuardState) -> Self {
        Self {
            mode: state.mode,
            mounted: state.mounted,
            pending_mounts: state.mount_count,
            forced_mounts: state.forced_mount_count,
            pending_writes: state.write_count,
            forced_writes: state.forced_write_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_unmounted_and_empty() {
        let state = GuardState::new(Mode::LameDuck);
        assert_eq!(state.mode, Mode::LameDuck);
        assert!(!state.mounted);
        assert_eq!(state.mount_count, 0);
        assert_eq!(state.write_count, 0);
    }

    #[test]
    fn test_forced_counts_track_subset() {
        let mut state = GuardState::new(Mode::Normal);
        state.add_mount(true);
        state.add_mount(false);
        state.add_write(true);
        assert_eq!((state.mount_count, state.forced_mount_count), (2, 1));
        assert_eq!((state.write_count, state.forced_write_count), (1, 1));

        state.remove_mount(false);
        state.remove_write(true);
        assert_eq!((state.mount_count, state.forced_mount_count), (1, 1));
        assert_eq!((state.write_count, state.forced_write_count), (0, 0));
    }

    #[test]
    fn test_is_idle_mounted() {
        let mut state = GuardState::new(Mode::Normal);
        assert!(!state.is_idle_mounted());
        state.mounted = true;
        assert!(state.is_idle_mounted());
        state.add_mount(false);
        assert!(!state.is_idle_mounted());
    }

    #[test]
    fn test_status_from_state() {
        let mut state = GuardState::new(Mode::EagerUnmount);
        state.mounted = true;
        state.add_mount(true);
        state.add_write(false);

        let status = GuardStatus::from(&state);
        assert_eq!(status.mode, Mode::EagerUnmount);
        assert!(status.mounted);
        assert_eq!(status.pending_mounts, 1);
        assert_eq!(status.forced_mounts, 1);
        assert_eq!(status.pending_writes, 1);
        assert_eq!(status.forced_writes, 0);
    }
}
