//! Configuration for a guard.

use std::path::Path;

use powersafe_shared::constants::guard as const_guard;
use powersafe_shared::errors::{PowersafeError, PowersafeResult};
use serde::{Deserialize, Serialize};

use crate::guard::Mode;

/// Options applied when a [`Guard`](crate::Guard) is created.
///
/// Every field has a default, so an empty JSON object is a valid config:
///
/// ```rust
/// use powersafe::{GuardOptions, Mode};
///
/// let options = GuardOptions::from_json(r#"{ "initial_mode": "lame_duck" }"#)?;
/// assert_eq!(options.initial_mode, Mode::LameDuck);
/// assert_eq!(options.label, "fs");
/// # Ok::<(), powersafe::PowersafeError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardOptions {
    /// Mode the guard starts in.
    ///
    /// Default: normal
    #[serde(default)]
    pub initial_mode: Mode,

    /// Name attached to log events, to tell several guards apart.
    ///
    /// Default: "fs"
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    const_guard::DEFAULT_LABEL.to_string()
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            initial_mode: Mode::default(),
            label: default_label(),
        }
    }
}

impl GuardOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> PowersafeResult<Self> {
        let options: GuardOptions = serde_json::from_str(json)
            .map_err(|e| PowersafeError::Config(format!("invalid guard options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file.
    pub fn from_file(path: &Path) -> PowersafeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PowersafeError::Config(format!(
                "failed to read guard options {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> PowersafeResult<()> {
        if self.label.trim().is_empty() {
            return Err(PowersafeError::InvalidArgument(
                "guard label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = GuardOptions::default();
        assert_eq!(options.initial_mode, Mode::Normal);
        assert_eq!(options.label, "fs");
        assert_eq!(options.initial_mode.as_str(), const_guard::DEFAULT_MODE);
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let options = GuardOptions::from_json("{}").unwrap();
        assert_eq!(options, GuardOptions::default());
    }

    #[test]
    fn test_from_json_full() {
        let options =
            GuardOptions::from_json(r#"{ "initial_mode": "shutdown", "label": "sdcard" }"#)
                .unwrap();
        assert_eq!(options.initial_mode, Mode::Shutdown);
        assert_eq!(options.label, "sdcard");
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = GuardOptions::from_json(r#"{ "initial_mode": "asleep" }"#).unwrap_err();
        assert!(matches!(err, PowersafeError::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_empty_label() {
        let err = GuardOptions::from_json(r#"{ "label": "  " }"#).unwrap_err();
        assert!(matches!(err, PowersafeError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_mode": "eager_unmount" }}"#).unwrap();

        let options = GuardOptions::from_file(file.path()).unwrap();
        assert_eq!(options.initial_mode, Mode::EagerUnmount);
    }

    #[test]
    fn test_from_missing_file() {
        let err = GuardOptions::from_file(Path::new("/nonexistent/guard.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/guard.json"));
    }
}
