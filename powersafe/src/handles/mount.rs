//! Mount handle.

use crate::guard::Guard;

/// Keeps the device mounted for as long as it is alive.
///
/// Depending on the guard's mode, the device may stay mounted after the
/// handle is dropped. For write access, also hold a
/// [`WriteTransaction`](crate::WriteTransaction).
///
/// ```rust
/// # use powersafe::{FnDevice, Guard};
/// # use std::sync::Arc;
/// # let guard = Guard::new(Arc::new(FnDevice::new(|| true, || {})));
/// let mount = guard.mount(false);
/// if mount.mounted() {
///     // Perform reads on the filesystem.
/// }
/// ```
#[must_use = "the mount is released as soon as the handle is dropped"]
#[derive(Debug)]
pub struct Mount<'g> {
    guard: &'g Guard,
    forced: bool,
    /// Granted, and this handle still owns the release.
    mounted: bool,
}

impl<'g> Mount<'g> {
    /// Ask `guard` to mount the device. `forced` requests pass `LameDuck`.
    pub fn new(guard: &'g Guard, forced: bool) -> Self {
        let mounted = guard.try_mount(forced);
        Self {
            guard,
            forced,
            mounted,
        }
    }

    /// Whether the request was granted (and is still held by this handle).
    pub fn mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Move the acquisition into a new handle, leaving `self` disarmed.
    pub fn transfer(&mut self) -> Mount<'g> {
        let mounted = std::mem::replace(&mut self.mounted, false);
        Mount {
            guard: self.guard,
            forced: self.forced,
            mounted,
        }
    }
}

impl Drop for Mount<'_> {
    fn drop(&mut self) {
        if self.mounted {
            self.guard.release_mount(self.forced);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FnDevice;
    use crate::guard::Mode;
    use std::sync::Arc;

    fn guard(accept: bool) -> Guard {
        Guard::new(Arc::new(FnDevice::new(move || accept, || {})))
    }

    #[test]
    fn test_mount_granted_and_released() {
        let guard = guard(true);
        {
            let mount = guard.mount(false);
            assert!(mount.mounted());
            assert!(!mount.is_forced());
            assert_eq!(guard.pending_mounts(), 1);
        }
        assert_eq!(guard.pending_mounts(), 0);
    }

    #[test]
    fn test_denied_mount_releases_nothing() {
        let guard = guard(false);
        let mount = Mount::new(&guard, true);
        assert!(!mount.mounted());
        assert!(mount.is_forced());
        drop(mount);
        assert_eq!(guard.pending_mounts(), 0);
    }

    #[test]
    fn test_move_releases_once() {
        let guard = guard(true);
        let mount = guard.mount(true);
        let moved = mount;
        assert!(moved.mounted());
        assert_eq!(guard.status().forced_mounts, 1);
        drop(moved);
        assert_eq!(guard.pending_mounts(), 0);
        assert_eq!(guard.status().forced_mounts, 0);
    }

    #[test]
    fn test_transfer_disarms_source() {
        let guard = guard(true);
        guard.set_mode(Mode::EagerUnmount);

        let mut source = guard.mount(false);
        let target = source.transfer();
        assert!(!source.mounted());
        assert!(target.mounted());

        drop(source);
        assert_eq!(guard.pending_mounts(), 1);
        assert!(guard.is_mounted());

        drop(target);
        assert_eq!(guard.pending_mounts(), 0);
        assert!(!guard.is_mounted());
    }

    #[test]
    fn test_transfer_of_denied_handle_stays_denied() {
        let guard = guard(true);
        guard.set_mode(Mode::Shutdown);
        let mut source = guard.mount(true);
        let target = source.transfer();
        assert!(!target.mounted());
        assert!(target.is_forced());
    }
}
