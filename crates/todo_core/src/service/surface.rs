//! Per-surface todo session.
//!
//! # Responsibility
//! - Load one independent snapshot when a surface activates.
//! - Run mutations against that snapshot and persist the full collection
//!   after every applied change.
//! - Serve list/kanban/search projections from the snapshot.
//!
//! # Invariants
//! - Sessions never observe each other's writes until `reload()`.
//! - Decode and persistence failures are logged and recovered here; no
//!   mutation returns an error.
//! - No-op mutations do not touch storage.

use crate::host::{Clock, ConfirmationPrompt, IdGenerator, SystemClock, UuidIdGenerator};
use crate::model::filter::TodoFilter;
use crate::model::sample::sample_todos;
use crate::model::todo::{Priority, Todo, TodoId, TodoStatus};
use crate::mutation::{ops, Mutation, MutationOutcome};
use crate::projection::filter::filter_by_criterion;
use crate::projection::kanban::{kanban_grouping, KanbanBoard};
use crate::projection::search::{search_and_sort, SearchCriteria};
use crate::projection::stats::{aggregate_stats, TodoStats};
use crate::repo::todo_repo::{RepoError, TodoRepository};
use log::{debug, error, info, warn};
use std::rc::Rc;

/// Prompt shown before `clear_all`.
pub const CLEAR_ALL_PROMPT: &str = "Delete all todos? This cannot be undone.";
/// Prompt shown before loading sample data.
pub const LOAD_SAMPLES_PROMPT: &str = "Load sample todos? They are added to your existing todos.";

/// Which presentation surface owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    List,
    Kanban,
    Search,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Kanban => "kanban",
            Self::Search => "search",
        }
    }

    /// Only the list surface reads and writes the filter preference.
    fn uses_filter(self) -> bool {
        self == Self::List
    }
}

/// One surface's in-memory collection plus its write-through repository.
pub struct SurfaceSession<R: TodoRepository> {
    kind: SurfaceKind,
    repo: R,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    todos: Vec<Todo>,
    filter: TodoFilter,
    last_persist_error: Option<RepoError>,
}

impl<R: TodoRepository> SurfaceSession<R> {
    /// Loads the stored snapshot for `kind`.
    ///
    /// An undecodable snapshot starts the session empty.
    pub fn activate(kind: SurfaceKind, repo: R) -> Self {
        let mut session = Self {
            kind,
            repo,
            clock: Rc::new(SystemClock),
            ids: Rc::new(UuidIdGenerator),
            todos: Vec::new(),
            filter: TodoFilter::All,
            last_persist_error: None,
        };
        session.reload();
        session
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Rc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the in-memory snapshot with what storage holds now.
    pub fn reload(&mut self) {
        self.todos = match self.repo.load_todos() {
            Ok(todos) => todos,
            Err(err) => {
                error!(
                    "event=surface_activate module=service surface={} status=error error={err}",
                    self.kind.as_str()
                );
                Vec::new()
            }
        };

        self.filter = if self.kind.uses_filter() {
            self.repo.load_filter().unwrap_or_else(|err| {
                warn!(
                    "event=surface_activate module=service surface={} status=error field=filter error={err}",
                    self.kind.as_str()
                );
                TodoFilter::All
            })
        } else {
            TodoFilter::All
        };

        info!(
            "event=surface_activate module=service surface={} status=ok records={} filter={}",
            self.kind.as_str(),
            self.todos.len(),
            self.filter.as_str()
        );
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Most recent failed write, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&RepoError> {
        self.last_persist_error.as_ref()
    }

    pub fn create(&mut self, text: &str) -> MutationOutcome {
        let mutation = ops::create(&self.todos, text, self.ids.next_id(), self.clock.now());
        self.commit("create", mutation)
    }

    pub fn edit(&mut self, id: &TodoId, text: &str) -> MutationOutcome {
        let mutation = ops::edit(&self.todos, id, text);
        self.commit("edit", mutation)
    }

    pub fn delete(&mut self, id: &TodoId) -> MutationOutcome {
        let mutation = ops::delete(&self.todos, id);
        self.commit("delete", mutation)
    }

    pub fn toggle(&mut self, id: &TodoId) -> MutationOutcome {
        let mutation = ops::toggle(&self.todos, id);
        self.commit("toggle", mutation)
    }

    /// Also used for kanban drops; dropping onto the current column is a no-op.
    pub fn update_status(&mut self, id: &TodoId, status: TodoStatus) -> MutationOutcome {
        let mutation = ops::update_status(&self.todos, id, status);
        self.commit("update_status", mutation)
    }

    pub fn update_priority(&mut self, id: &TodoId, priority: Priority) -> MutationOutcome {
        let mutation = ops::update_priority(&self.todos, id, priority);
        self.commit("update_priority", mutation)
    }

    pub fn cycle_status(&mut self, id: &TodoId) -> MutationOutcome {
        let mutation = ops::cycle_status(&self.todos, id);
        self.commit("cycle_status", mutation)
    }

    pub fn cycle_priority(&mut self, id: &TodoId) -> MutationOutcome {
        let mutation = ops::cycle_priority(&self.todos, id);
        self.commit("cycle_priority", mutation)
    }

    pub fn clear_completed(&mut self) -> MutationOutcome {
        let mutation = ops::clear_completed(&self.todos);
        self.commit("clear_completed", mutation)
    }

    /// Empties the collection and resets the filter after confirmation.
    ///
    /// Declining leaves memory and storage untouched. On acceptance both
    /// storage keys are removed independently.
    pub fn clear_all(&mut self, prompt: &dyn ConfirmationPrompt) -> MutationOutcome {
        let mutation = ops::clear_all(&self.todos, prompt.confirm(CLEAR_ALL_PROMPT));
        let outcome = mutation.outcome;
        log_mutation(self.kind, "clear_all", &mutation);
        if !mutation.is_applied() {
            return outcome;
        }

        self.todos = mutation.into_todos();
        self.filter = TodoFilter::All;
        let result = self.repo.clear();
        self.record_persist_result(result);
        outcome
    }

    /// Appends the built-in samples not already present, after confirmation.
    pub fn load_samples(&mut self, prompt: &dyn ConfirmationPrompt) -> MutationOutcome {
        let confirmed = prompt.confirm(LOAD_SAMPLES_PROMPT);
        let mutation = ops::load_samples(&self.todos, sample_todos(self.clock.now()), confirmed);
        self.commit("load_samples", mutation)
    }

    /// Changes and persists the list filter preference.
    ///
    /// Written under its own key, independently of the collection.
    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
        let result = self.repo.save_filter(filter);
        self.record_persist_result(result);
    }

    /// Todos passing the current filter, in collection order.
    pub fn visible_todos(&self) -> Vec<Todo> {
        filter_by_criterion(&self.todos, self.filter)
    }

    pub fn kanban_board(&self) -> KanbanBoard {
        kanban_grouping(&self.todos)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Todo> {
        search_and_sort(&self.todos, criteria)
    }

    /// Counts over the whole snapshot.
    pub fn stats(&self) -> TodoStats {
        aggregate_stats(&self.todos)
    }

    fn commit(&mut self, op: &'static str, mutation: Mutation) -> MutationOutcome {
        let outcome = mutation.outcome;
        log_mutation(self.kind, op, &mutation);
        if mutation.is_applied() {
            self.todos = mutation.into_todos();
            let result = self.repo.save_todos(&self.todos);
            self.record_persist_result(result);
        }
        outcome
    }

    fn record_persist_result(&mut self, result: Result<(), RepoError>) {
        match result {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                warn!(
                    "event=snapshot_persist module=service surface={} status=error recovery=keep_in_memory error={err}",
                    self.kind.as_str()
                );
                self.last_persist_error = Some(err);
            }
        }
    }
}

fn log_mutation(kind: SurfaceKind, op: &str, mutation: &Mutation) {
    match mutation.noop_reason() {
        None => info!(
            "event=todo_mutation module=service surface={} op={op} status=ok records={}",
            kind.as_str(),
            mutation.todos.len()
        ),
        Some(reason) => debug!(
            "event=todo_mutation module=service surface={} op={op} status=noop reason={reason}",
            kind.as_str()
        ),
    }
}
