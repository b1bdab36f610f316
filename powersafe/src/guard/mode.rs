//! Guard operating modes.
//!
//! The mode decides which mount and write requests are admitted and whether
//! the device is unmounted once the last mount handle goes away.

use powersafe_shared::errors::{PowersafeError, PowersafeResult};
use serde::{Deserialize, Serialize};

/// Admission and unmount policy of a [`Guard`](crate::Guard).
///
/// ```text
/// mode            unforced  forced  unmount when idle
/// normal          yes       yes     no
/// eager_unmount   yes       yes     yes
/// lame_duck       no        yes     yes
/// shutdown        no        no      yes
/// disabled        no        no      immediately, even if in use
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// All requests are granted. Once mounted, the device stays mounted
    /// until the mode changes.
    #[default]
    Normal,

    /// Like `Normal`, but the device is unmounted as soon as the last
    /// mount handle is released.
    EagerUnmount,

    /// Only forced requests are granted. The device is unmounted as soon as
    /// the last mount handle is released.
    LameDuck,

    /// No requests are granted, forced or not. The device is unmounted as
    /// soon as the last mount handle is released.
    Shutdown,

    /// The device is unmounted right away, even while in use.
    Disabled,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Normal,
        Mode::EagerUnmount,
        Mode::LameDuck,
        Mode::Shutdown,
        Mode::Disabled,
    ];

    /// Whether a new mount or write request with the given `forced` flag
    /// passes the mode policy.
    pub fn admits(&self, forced: bool) -> bool {
        match self {
            Mode::Normal | Mode::EagerUnmount => true,
            Mode::LameDuck => forced,
            Mode::Shutdown | Mode::Disabled => false,
        }
    }

    /// Whether the device is unmounted once no mount handles remain.
    pub fn unmounts_when_idle(&self) -> bool {
        !matches!(self, Mode::Normal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::EagerUnmount => "eager_unmount",
            Mode::LameDuck => "lame_duck",
            Mode::Shutdown => "shutdown",
            Mode::Disabled => "disabled",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = PowersafeError;

    fn from_str(s: &str) -> PowersafeResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                PowersafeError::InvalidArgument(format!(
                    "unknown mode `{}`, expected one of: normal, eager_unmount, lame_duck, shutdown, disabled",
                    s
                ))
            })
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
