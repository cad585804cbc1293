//! Host key-value storage contract and in-memory implementation.
//!
//! # Responsibility
//! - Define the minimal `get/set/remove` surface the core persists through.
//! - Emulate browser-style storage limits (quota, disabled storage).
//!
//! # Invariants
//! - Methods take `&self` so several surfaces can share one store.
//! - A rejected `set` leaves the previous value in place.

use crate::db::DbError;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failures.
#[derive(Debug)]
pub enum StoreError {
    /// Write would exceed the store's byte quota.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    /// Storage is disabled by the host.
    Unavailable,
    /// Connection has not been migrated to the key-value schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes > {quota_bytes}"
            ),
            Self::Unavailable => write!(f, "storage is unavailable"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent string-to-string storage provided by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: Cell<bool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys plus values exceed
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Toggles disabled mode; every call fails with `Unavailable` while set.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn ensure_enabled(&self) -> StoreResult<()> {
        if self.disabled.get() {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_enabled()?;
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.ensure_enabled()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore, StoreError};

    #[test]
    fn set_get_remove_roundtrip() {
        let store = MemoryKvStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let store = MemoryKvStore::with_quota(8);
        store.set("k", "1234").unwrap();

        let err = store.set("k", "123456789").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { quota_bytes: 8, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn quota_counts_replaced_value_only_once() {
        let store = MemoryKvStore::with_quota(6);
        store.set("k", "12345").unwrap();
        store.set("k", "54321").unwrap();
    }

    #[test]
    fn disabled_store_fails_every_call() {
        let store = MemoryKvStore::new();
        store.set_disabled(true);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable)));
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable)));
        store.set_disabled(false);
        store.set("k", "v").unwrap();
    }
}
