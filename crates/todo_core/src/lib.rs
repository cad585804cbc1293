//! Core domain logic for the todo app.
//! This crate is the single source of truth for todo invariants; the list,
//! kanban and search surfaces only render what it returns.

pub mod codec;
pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod projection;
pub mod repo;
pub mod service;

pub use codec::{
    decode_snapshot, decode_todos, decode_todos_or_empty, encode_todos, DecodeError,
    DecodedSnapshot, RecordError,
};
pub use config::{ConfigError, CoreConfig, StorageKeys};
pub use host::{
    AlwaysConfirm, Clock, ConfirmationPrompt, FixedClock, IdGenerator, NeverConfirm,
    SequentialIdGenerator, SystemClock, UuidIdGenerator,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::filter::TodoFilter;
pub use model::sample::sample_todos;
pub use model::todo::{Priority, Todo, TodoId, TodoStatus, TodoValidationError};
pub use mutation::{Mutation, MutationOutcome, NoopReason};
pub use projection::age::{relative_age, RelativeAge};
pub use projection::filter::filter_by_criterion;
pub use projection::kanban::{kanban_grouping, KanbanBoard, KanbanColumn};
pub use projection::search::{
    search_and_sort, PriorityFilter, SearchCriteria, SortOrder, StatusFilter,
};
pub use projection::stats::{aggregate_stats, PriorityCounts, TodoStats};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, StoreError, StoreResult};
pub use repo::sqlite_kv::SqliteKvStore;
pub use repo::todo_repo::{KvTodoRepository, RepoError, RepoResult, TodoRepository};
pub use service::surface::{SurfaceKind, SurfaceSession};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
