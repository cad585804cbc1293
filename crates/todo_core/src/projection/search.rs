//! Search surface query: text match, exact-match filters, sort order.
//!
//! # Invariants
//! - Blank query text matches every todo.
//! - Sorting is stable, so ties keep collection order.

use crate::model::todo::{Priority, Todo, TodoStatus};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Priority selector; `All` passes everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    pub fn only(priority: Priority) -> Self {
        match priority {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
        }
    }

    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Low => priority == Priority::Low,
            Self::Medium => priority == Priority::Medium,
            Self::High => priority == Priority::High,
        }
    }
}

/// Status selector; `All` passes everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Done,
}

impl StatusFilter {
    pub fn only(status: TodoStatus) -> Self {
        match status {
            TodoStatus::Todo => Self::Todo,
            TodoStatus::InProgress => Self::InProgress,
            TodoStatus::Done => Self::Done,
        }
    }

    pub fn matches(self, status: TodoStatus) -> bool {
        match self {
            Self::All => true,
            Self::Todo => status == TodoStatus::Todo,
            Self::InProgress => status == TodoStatus::InProgress,
            Self::Done => status == TodoStatus::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// `createdAt` descending.
    #[default]
    Newest,
    /// `createdAt` ascending.
    Oldest,
    /// `high > medium > low`.
    Priority,
    /// Unicode collation order (CLDR root).
    Alphabetical,
}

/// Search surface state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub query: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
    pub sort: SortOrder,
}

impl SearchCriteria {
    /// Criteria with only a text query set.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restores empty query, `all` filters and `newest` order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns whether `todo` passes the text and field filters.
    pub fn matches(&self, todo: &Todo) -> bool {
        let needle = self.query.trim();
        (needle.is_empty() || todo.text.to_lowercase().contains(&needle.to_lowercase()))
            && self.priority.matches(todo.priority)
            && self.status.matches(todo.status)
    }
}

/// Applies `criteria` filters, then sorts by `criteria.sort`.
pub fn search_and_sort(todos: &[Todo], criteria: &SearchCriteria) -> Vec<Todo> {
    let mut result: Vec<Todo> = todos
        .iter()
        .filter(|todo| criteria.matches(todo))
        .cloned()
        .collect();
    sort_todos(&mut result, criteria.sort);
    result
}

/// Stable in-place sort.
pub fn sort_todos(todos: &mut [Todo], order: SortOrder) {
    match order {
        SortOrder::Newest => todos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => todos.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Priority => todos.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortOrder::Alphabetical => {
            let mut collator = Collator::default();
            todos.sort_by(|a, b| compare_text(&mut collator, &a.text, &b.text));
        }
    }
}

/// Collation order, falling back to code points when texts collate equal.
fn compare_text(collator: &mut Collator, left: &str, right: &str) -> Ordering {
    collator
        .collate(left, right)
        .then_with(|| left.cmp(right))
}
