//! Metrics collection for a guard.
//!
//! Follows a storage/snapshot split:
//! - **GuardMetricsStorage**: atomic counters owned by the guard
//! - **GuardMetrics**: plain snapshot handed out to callers
//!
//! All counters are monotonic (never decrease). Delta calculation is the
//! caller's responsibility.
//!
//! # Example
//!
//! ```rust
//! use powersafe::{FnDevice, Guard};
//! use std::sync::Arc;
//!
//! let guard = Guard::new(Arc::new(FnDevice::new(|| true, || {})));
//! drop(guard.mount(false));
//!
//! let metrics = guard.metrics();
//! assert_eq!(metrics.device_mounts_total, 1);
//! assert_eq!(metrics.mounts_granted_total, 1);
//! ```

mod guard_metrics;

pub use guard_metrics::{GuardMetrics, GuardMetricsStorage};
