//! Error types for powersafe.
//!
//! Admission decisions made by the guard never produce errors; a denied
//! request is reported through the handle itself. These errors cover the
//! surrounding plumbing: option and scenario loading, argument parsing, and
//! logging setup.

use thiserror::Error;

/// Result alias used across the powersafe crates.
pub type PowersafeResult<T> = Result<T, PowersafeError>;

#[derive(Debug, Error)]
pub enum PowersafeError {
    /// A value supplied by the caller could not be interpreted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration or scenario input could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for PowersafeError {
    fn from(err: serde_json::Error) -> Self {
        PowersafeError::Config(err.to_string())
    }
}

impl From<std::io::Error> for PowersafeError {
    fn from(err: std::io::Error) -> Self {
        PowersafeError::Config(err.to_string())
    }
}
