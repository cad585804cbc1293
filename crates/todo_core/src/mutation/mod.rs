//! Mutation engine.
//!
//! # Responsibility
//! - Provide pure `(collection, args) -> collection` operations.
//! - Report no-ops explicitly instead of raising errors.
//!
//! # Invariants
//! - Every returned collection satisfies `Todo::validate()` for each record.
//! - Ids stay unique; new todos are prepended.
//! - A missing id never fails, it yields `NoopReason::NotFound`.

pub mod ops;

use crate::model::todo::Todo;
use std::fmt::{Display, Formatter};

/// Why an operation left the collection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    /// Input text was empty after trimming.
    BlankText,
    /// Requested value equals the current one.
    Unchanged,
    /// Target id is not in the collection.
    NotFound,
    /// Generated id already exists in the collection.
    DuplicateId,
    /// Caller's confirmation step was declined.
    Declined,
}

impl NoopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlankText => "blank_text",
            Self::Unchanged => "unchanged",
            Self::NotFound => "not_found",
            Self::DuplicateId => "duplicate_id",
            Self::Declined => "declined",
        }
    }
}

impl Display for NoopReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Noop(NoopReason),
}

/// Result of one mutation: the next collection plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub todos: Vec<Todo>,
    pub outcome: MutationOutcome,
}

impl Mutation {
    pub(crate) fn applied(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            outcome: MutationOutcome::Applied,
        }
    }

    pub(crate) fn noop(todos: &[Todo], reason: NoopReason) -> Self {
        Self {
            todos: todos.to_vec(),
            outcome: MutationOutcome::Noop(reason),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == MutationOutcome::Applied
    }

    /// Returns the no-op reason, if any.
    pub fn noop_reason(&self) -> Option<NoopReason> {
        match self.outcome {
            MutationOutcome::Applied => None,
            MutationOutcome::Noop(reason) => Some(reason),
        }
    }

    pub fn into_todos(self) -> Vec<Todo> {
        self.todos
    }
}
