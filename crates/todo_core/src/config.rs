//! Core configuration.
//!
//! # Responsibility
//! - Describe storage keys and logging/database settings for a host.
//! - Load settings from a JSON file with every field defaulted.
//!
//! # Invariants
//! - Unknown fields are rejected so typos do not silently fall back.
//! - Storage keys are never blank.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default key of the collection snapshot.
pub const DEFAULT_TODOS_KEY: &str = "todos";
/// Default key of the list filter preference.
pub const DEFAULT_FILTER_KEY: &str = "todoFilter";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    BlankKey(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::BlankKey(field) => write!(f, "config field `{field}` must not be blank"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::BlankKey(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Host key-value storage keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub todos: String,
    pub filter: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            todos: DEFAULT_TODOS_KEY.to_string(),
            filter: DEFAULT_FILTER_KEY.to_string(),
        }
    }
}

/// Settings a host passes to the core at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub todos_key: String,
    pub filter_key: String,
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file backing the key-value store. In-memory when unset.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            todos_key: DEFAULT_TODOS_KEY.to_string(),
            filter_key: DEFAULT_FILTER_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            todos: self.todos_key.trim().to_string(),
            filter: self.filter_key.trim().to_string(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.todos_key.trim().is_empty() {
            return Err(ConfigError::BlankKey("todos_key"));
        }
        if self.filter_key.trim().is_empty() {
            return Err(ConfigError::BlankKey("filter_key"));
        }
        Ok(())
    }
}
