//! Powersafe - admission control for a filesystem that must not be left
//! mid-write.
//!
//! A [`Guard`] sits between callers and a physical [`Device`]. Callers ask
//! for a [`Mount`] to keep the device mounted and for a [`WriteTransaction`]
//! before writing. The guard's [`Mode`] decides which requests are granted
//! and when the device is physically mounted or unmounted; mounts are
//! reference-counted across threads.
//!
//! ```rust
//! use powersafe::{FnDevice, Guard, Mode};
//! use std::sync::Arc;
//!
//! let guard = Guard::new(Arc::new(FnDevice::new(|| true, || {})));
//! guard.set_mode(Mode::EagerUnmount);
//!
//! {
//!     let mount = guard.mount(false);
//!     assert!(mount.mounted());
//! }
//! // Last mount released: unmounted right away in EagerUnmount.
//! assert!(!guard.is_mounted());
//! ```

pub mod device;
pub mod guard;
pub mod handles;
pub mod metrics;
pub mod options;
pub mod util;

pub use device::{Device, FnDevice};
pub use guard::{Guard, GuardStatus, Mode};
pub use handles::{Mount, WriteTransaction};
pub use metrics::{GuardMetrics, GuardMetricsStorage};
pub use options::GuardOptions;
pub use powersafe_shared::constants;
pub use powersafe_shared::errors::{PowersafeError, PowersafeResult};
