//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical Todo record shared by list/kanban/search surfaces.
//! - Own the setters that keep `completed` and `status` coupled.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - `text` is non-empty after trimming.
//! - `completed == (status == TodoStatus::Done)` after every setter call.
//! - Turning `completed` off always lands on `TodoStatus::Todo`, even when the
//!   previous status was `InProgress`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque todo identifier.
///
/// Kept as a string newtype because persisted collections may carry ids that
/// were not generated by this crate (for example `sample-1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kanban lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    /// Not started.
    #[default]
    Todo,
    /// Work has started.
    InProgress,
    /// Finished. The only status with `completed == true`.
    Done,
}

impl TodoStatus {
    /// Stable wire value (`todo|in-progress|done`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// `todo -> in-progress -> done -> todo`.
    pub fn next(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    /// Status implied by a completed flag when no explicit status exists.
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Done
        } else {
            Self::Todo
        }
    }
}

/// Todo priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Sort weight: `high(3) > medium(2) > low(1)`.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// `low -> medium -> high -> low`.
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Validation failures for a single todo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Text is empty after trimming.
    BlankText,
    /// `completed` disagrees with `status`.
    StatusMismatch {
        completed: bool,
        status: TodoStatus,
    },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "todo text must not be blank"),
            Self::StatusMismatch { completed, status } => write!(
                f,
                "completed ({completed}) does not match status `{}`",
                status.as_str()
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    /// Trimmed, non-empty user text.
    pub text: String,
    pub completed: bool,
    /// Creation time, immutable after create.
    pub created_at: DateTime<Utc>,
    pub status: TodoStatus,
    pub priority: Priority,
}

impl Todo {
    /// Creates a fresh todo with default status/priority.
    ///
    /// `created_at` is truncated to millisecond precision, the resolution of
    /// the persisted timestamp format.
    ///
    /// # Errors
    /// - Returns `BlankText` when `text` is empty after trimming.
    pub fn new(
        id: TodoId,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TodoValidationError> {
        let text = normalize_text(text).ok_or(TodoValidationError::BlankText)?;
        Ok(Self {
            id,
            text,
            completed: false,
            created_at: created_at.trunc_subsecs(3),
            status: TodoStatus::Todo,
            priority: Priority::Medium,
        })
    }

    /// Checks the record-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::BlankText);
        }
        if self.completed != (self.status == TodoStatus::Done) {
            return Err(TodoValidationError::StatusMismatch {
                completed: self.completed,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Sets `status` and derives `completed` from it.
    pub fn set_status(&mut self, status: TodoStatus) {
        self.status = status;
        self.completed = status == TodoStatus::Done;
    }

    /// Sets `completed` and derives `status` from it.
    ///
    /// Clearing `completed` always yields `TodoStatus::Todo`; a previous
    /// `InProgress` is not restored.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.status = TodoStatus::from_completed(completed);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn cycle_priority(&mut self) {
        self.priority = self.priority.next();
    }

    pub fn cycle_status(&mut self) {
        self.set_status(self.status.next());
    }

    /// Returns whether this todo is still open.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Trims user text, returning `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Priority, Todo, TodoId, TodoStatus, TodoValidationError};
    use chrono::{TimeZone, Utc};

    fn todo() -> Todo {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Todo::new(TodoId::from("t1"), "  write docs ", created_at).unwrap()
    }

    #[test]
    fn new_trims_text_and_sets_defaults() {
        let todo = todo();
        assert_eq!(todo.text, "write docs");
        assert!(!todo.completed);
        assert_eq!(todo.status, TodoStatus::Todo);
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn new_rejects_blank_text() {
        let err = Todo::new(TodoId::from("t1"), "   ", Utc::now()).unwrap_err();
        assert_eq!(err, TodoValidationError::BlankText);
    }

    #[test]
    fn status_cycle_keeps_completed_in_sync() {
        let mut todo = todo();
        todo.cycle_status();
        assert_eq!(todo.status, TodoStatus::InProgress);
        assert!(!todo.completed);
        todo.cycle_status();
        assert_eq!(todo.status, TodoStatus::Done);
        assert!(todo.completed);
        todo.cycle_status();
        assert_eq!(todo.status, TodoStatus::Todo);
        assert!(!todo.completed);
    }

    #[test]
    fn priority_cycle_wraps_around() {
        let mut todo = todo();
        todo.cycle_priority();
        assert_eq!(todo.priority, Priority::High);
        todo.cycle_priority();
        assert_eq!(todo.priority, Priority::Low);
        todo.cycle_priority();
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn validate_reports_status_mismatch() {
        let mut todo = todo();
        todo.completed = true;
        assert_eq!(
            todo.validate().unwrap_err(),
            TodoValidationError::StatusMismatch {
                completed: true,
                status: TodoStatus::Todo,
            }
        );
    }

    #[test]
    fn normalize_text_drops_whitespace_only_input() {
        assert_eq!(normalize_text(" \t\n"), None);
        assert_eq!(normalize_text(" a "), Some("a".to_string()));
    }
}
