//! Store configuration.
//!
//! Values come from defaults, then `NOTEPAD_*` environment overrides. Front
//! ends may override individual fields afterwards (for example from flags).

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Slot key used when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "note-taking-app-notes";
const DEFAULT_DB_FILE_NAME: &str = "notepad.sqlite3";
const ENV_PREFIX: &str = "NOTEPAD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("storage_key cannot be empty")]
    EmptyStorageKey,
}

/// Configuration for a note store and its host process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the single slot holding the serialized note collection.
    pub storage_key: String,
    /// SQLite file used by the durable backend.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Recognized: `NOTEPAD_STORAGE_KEY`, `NOTEPAD_DB_PATH`,
    /// `NOTEPAD_LOG_LEVEL`, `NOTEPAD_LOG_DIR`. Blank values are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(format!("{ENV_PREFIX}_{name}")).ok());
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the store cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read("STORAGE_KEY") {
            self.storage_key = value;
        }
        if let Some(value) = read("DB_PATH") {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = read("LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = read("LOG_DIR") {
            self.log_dir = Some(PathBuf::from(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_use_application_slot_key() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.db_path.ends_with("notepad.sqlite3"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_replace_values_and_skip_blanks() {
        let env = HashMap::from([
            ("STORAGE_KEY", "work-notes"),
            ("DB_PATH", "/tmp/work.sqlite3"),
            ("LOG_LEVEL", "   "),
        ]);
        let mut config = StoreConfig::default();
        let default_level = config.log_level.clone();
        config.apply_overrides(|name| env.get(name).map(|value| value.to_string()));

        assert_eq!(config.storage_key, "work-notes");
        assert_eq!(config.db_path, PathBuf::from("/tmp/work.sqlite3"));
        assert_eq!(config.log_level, default_level);
    }

    #[test]
    fn validate_rejects_blank_key() {
        let config = StoreConfig {
            storage_key: "  ".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));
    }

    #[test]
    fn deserializes_partial_input_over_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"storage_key":"archive"}"#).unwrap();
        assert_eq!(config.storage_key, "archive");
        assert_eq!(config.log_level, StoreConfig::default().log_level);
    }
}
