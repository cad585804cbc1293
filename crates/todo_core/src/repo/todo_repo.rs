//! Todo repository over host key-value storage.
//!
//! # Responsibility
//! - Load/save the collection snapshot and the filter preference.
//! - Keep codec and storage details out of surface sessions.
//!
//! # Invariants
//! - The collection and filter keys are written independently, never as one
//!   transaction.
//! - A missing key loads as the default (empty collection / `all`).

use crate::codec::{decode_filter, decode_todos, encode_filter, encode_todos, DecodeError};
use crate::config::StorageKeys;
use crate::model::filter::TodoFilter;
use crate::model::todo::Todo;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Decode(DecodeError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode todo snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DecodeError> for RepoError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Load/save contract injected into each surface.
pub trait TodoRepository {
    fn load_todos(&self) -> RepoResult<Vec<Todo>>;
    fn save_todos(&self, todos: &[Todo]) -> RepoResult<()>;
    fn load_filter(&self) -> RepoResult<TodoFilter>;
    fn save_filter(&self, filter: TodoFilter) -> RepoResult<()>;
    /// Removes both keys. Each removal is attempted even if the other fails.
    fn clear(&self) -> RepoResult<()>;
}

/// `TodoRepository` over any `KeyValueStore`.
pub struct KvTodoRepository<S: KeyValueStore> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> KvTodoRepository<S> {
    /// Uses the default `todos`/`todoFilter` keys.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        match self.store.set(key, value) {
            Ok(()) => {
                debug!(
                    "event=snapshot_persist module=repo status=ok key={key} bytes={}",
                    value.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_persist module=repo status=error key={key} bytes={} error={err}",
                    value.len()
                );
                Err(err.into())
            }
        }
    }
}

impl<S: KeyValueStore> TodoRepository for KvTodoRepository<S> {
    fn load_todos(&self) -> RepoResult<Vec<Todo>> {
        match self.store.get(&self.keys.todos)? {
            Some(snapshot) => Ok(decode_todos(&snapshot)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_todos(&self, todos: &[Todo]) -> RepoResult<()> {
        let snapshot = encode_todos(todos)?;
        self.write(&self.keys.todos, &snapshot)
    }

    fn load_filter(&self) -> RepoResult<TodoFilter> {
        Ok(self
            .store
            .get(&self.keys.filter)?
            .map(|value| decode_filter(&value))
            .unwrap_or_default())
    }

    fn save_filter(&self, filter: TodoFilter) -> RepoResult<()> {
        self.write(&self.keys.filter, encode_filter(filter))
    }

    fn clear(&self) -> RepoResult<()> {
        let todos_result = self.store.remove(&self.keys.todos);
        let filter_result = self.store.remove(&self.keys.filter);
        todos_result?;
        filter_result?;
        Ok(())
    }
}
