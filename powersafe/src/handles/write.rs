//! Write transaction handle.

use crate::guard::Guard;

/// Signals intent to write while it is alive.
///
/// Only granted while the device is mounted, so acquire it inside a live
/// [`Mount`](crate::Mount):
///
/// ```rust
/// # use powersafe::{FnDevice, Guard};
/// # use std::sync::Arc;
/// # let guard = Guard::new(Arc::new(FnDevice::new(|| true, || {})));
/// let mount = guard.mount(false);
/// if mount.mounted() {
///     let write = guard.write(false);
///     if write.active() {
///         // Perform writes on the filesystem.
///     }
/// }
/// ```
///
/// This is an admission gate only. It makes no promise about durability or
/// atomicity of the writes performed under it.
#[must_use = "the write transaction ends as soon as the handle is dropped"]
#[derive(Debug)]
pub struct WriteTransaction<'g> {
    guard: &'g Guard,
    forced: bool,
    active: bool,
}

impl<'g> WriteTransaction<'g> {
    pub fn new(guard: &'g Guard, forced: bool) -> Self {
        let active = guard.try_begin_write(forced);
        Self {
            guard,
            forced,
            active,
        }
    }

    /// Whether the write was admitted (and is still held by this handle).
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Move the transaction into a new handle, leaving `self` inactive.
    pub fn transfer(&mut self) -> WriteTransaction<'g> {
        let active = std::mem::replace(&mut self.active, false);
        WriteTransaction {
            guard: self.guard,
            forced: self.forced,
            active,
        }
    }
}

impl Drop for WriteTransaction<'_> {
    fn drop(&mut self) {
        if self.active {
            self.guard.end_write(self.forced);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FnDevice;
    use crate::guard::Mode;
    use std::sync::Arc;

    fn guard() -> Guard {
        Guard::new(Arc::new(FnDevice::new(|| true, || {})))
    }

    #[test]
    fn test_write_denied_without_mount() {
        let guard = guard();
        let write = WriteTransaction::new(&guard, true);
        assert!(!write.active());
        drop(write);
        assert_eq!(guard.pending_writes(), 0);
    }

    #[test]
    fn test_write_granted_and_ended() {
        let guard = guard();
        let _mount = guard.mount(false);
        {
            let write = guard.write(false);
            assert!(write.active());
            assert!(!write.is_forced());
            assert_eq!(guard.pending_writes(), 1);
        }
        assert_eq!(guard.pending_writes(), 0);
    }

    #[test]
    fn test_write_outlives_mount_handle() {
        let guard = guard();
        guard.set_mode(Mode::EagerUnmount);

        let mount = guard.mount(false);
        let write = guard.write(false);
        drop(mount);

        // The guard does not track the pairing; the caller broke the contract
        assert!(!guard.is_mounted());
        assert!(write.active());
        assert_eq!(guard.pending_writes(), 1);
        drop(write);
        assert_eq!(guard.pending_writes(), 0);
    }

    #[test]
    fn test_transfer_disarms_source() {
        let guard = guard();
        let _mount = guard.mount(true);
        let mut source = guard.write(true);
        let target = source.transfer();
        assert!(!source.active());
        assert!(target.active());

        drop(source);
        assert_eq!(guard.status().forced_writes, 1);
        drop(target);
        assert_eq!(guard.status().forced_writes, 0);
        assert_eq!(guard.pending_writes(), 0);
    }
}
