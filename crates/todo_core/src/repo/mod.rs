//! Persistence adapters.
//!
//! # Responsibility
//! - Abstract host key-value storage (`KeyValueStore`).
//! - Provide memory and SQLite backends.
//! - Expose the load/save `TodoRepository` contract used by surfaces.
//!
//! # Invariants
//! - Repository reads decode through the codec; writes encode the full
//!   collection on every save.

pub mod kv_store;
pub mod sqlite_kv;
pub mod todo_repo;
