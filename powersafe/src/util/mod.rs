//! Logging setup helpers.
//!
//! The library itself only emits `tracing` events. Binaries and tests call
//! one of these helpers to install a subscriber.

use std::path::Path;

use powersafe_shared::constants::logging as const_logging;
use powersafe_shared::errors::{PowersafeError, PowersafeResult};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Build a filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> PowersafeResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| {
            PowersafeError::InvalidArgument(format!(
                "invalid log filter `{}`: {}",
                default_filter, e
            ))
        })
}

/// Log to stderr. Calling this again after a subscriber is installed is a
/// no-op.
pub fn init_logging(default_filter: &str) -> PowersafeResult<()> {
    let filter = env_filter(default_filter)?;
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
    Ok(())
}

/// Log to a daily-rotated file under `logs_dir`.
///
/// Keep the returned guard alive until shutdown, or buffered lines are lost.
pub fn init_file_logging(logs_dir: &Path, default_filter: &str) -> PowersafeResult<WorkerGuard> {
    std::fs::create_dir_all(logs_dir).map_err(|e| {
        PowersafeError::Internal(format!(
            "failed to create logs directory {}: {}",
            logs_dir.display(),
            e
        ))
    })?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, const_logging::FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    register_to_tracing(non_blocking, env_filter(default_filter)?);
    Ok(guard)
}

pub fn register_to_tracing(non_blocking: NonBlocking, env_filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false),
        )
        .try_init();
}
