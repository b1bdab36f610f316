//! Physical device abstraction.
//!
//! The guard never touches storage itself. It drives an implementation of
//! [`Device`], which owns the actual mount mechanism (SD card driver, block
//! device, FUSE session, ...).

use std::fmt;

/// A mountable resource arbitrated by a [`Guard`](crate::Guard).
///
/// Both methods are called while the guard's lock is held, so they must be
/// quick and must never call back into the same guard.
pub trait Device: Send + Sync {
    /// Attempt to mount the device. Returns `true` on success.
    ///
    /// Failures are the device's own business to report; the guard only
    /// routes the outcome back to the caller as a denied mount.
    fn mount(&self) -> bool;

    /// Unmount the device. Best-effort, no failure signal.
    fn unmount(&self);
}

/// Adapts a pair of closures into a [`Device`].
///
/// # Example
/// ```rust
/// use powersafe::{FnDevice, Guard};
/// use std::sync::Arc;
///
/// let device = FnDevice::new(|| true, || {});
/// let guard = Guard::new(Arc::new(device));
/// let mount = guard.mount(false);
/// assert!(mount.mounted());
/// ```
pub struct FnDevice<M, U>
where
    M: Fn() -> bool + Send + Sync,
    U: Fn() + Send + Sync,
{
    mount_fn: M,
    unmount_fn: U,
}

impl<M, U> FnDevice<M, U>
where
    M: Fn() -> bool + Send + Sync,
    U: Fn() + Send + Sync,
{
    pub fn new(mount_fn: M, unmount_fn: U) -> Self {
        Self {
            mount_fn,
            unmount_fn,
        }
    }
}

impl<M, U> Device for FnDevice<M, U>
where
    M: Fn() -> bool + Send + Sync,
    U: Fn() + Send + Sync,
{
    fn mount(&self) -> bool {
        (self.mount_fn)()
    }

    fn unmount(&self) {
        (self.unmount_fn)()
    }
}

impl<M, U> fmt::Debug for FnDevice<M, U>
where
    M: Fn() -> bool + Send + Sync,
    U: Fn() + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDevice").finish_non_exhaustive()
    }
}
