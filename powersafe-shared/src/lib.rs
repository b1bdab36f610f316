//! Powersafe Shared - Code shared by the guard library and its tools
//!
//! This crate contains the error type and the constants used by both the
//! `powersafe` library and the `powersafe` command-line tool.

pub mod constants;
pub mod errors;

pub use errors::{PowersafeError, PowersafeResult};
