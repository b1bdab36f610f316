//! Shared constants between the library and the CLI

/// Guard defaults
pub mod guard {
    /// Label used in log fields when none is configured
    pub const DEFAULT_LABEL: &str = "fs";

    /// Name of the mode a guard starts in when none is configured
    pub const DEFAULT_MODE: &str = "normal";
}

/// Logging constants
pub mod logging {
    /// Filter used when `RUST_LOG` is not set
    pub const DEFAULT_FILTER: &str = "warn";

    /// File name prefix for rolling log files
    pub const FILE_PREFIX: &str = "powersafe.log";
}
