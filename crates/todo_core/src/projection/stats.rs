//! Aggregate counts over a supplied slice.

use crate::model::todo::{Priority, Todo};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Counts for whatever collection was supplied, filtered or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    /// Always `total - completed`.
    pub active: usize,
    pub priority: PriorityCounts,
}

/// Single pass over `todos`.
pub fn aggregate_stats(todos: &[Todo]) -> TodoStats {
    let mut stats = todos.iter().fold(TodoStats::default(), |mut stats, todo| {
        stats.total += 1;
        if todo.completed {
            stats.completed += 1;
        }
        match todo.priority {
            Priority::High => stats.priority.high += 1,
            Priority::Medium => stats.priority.medium += 1,
            Priority::Low => stats.priority.low += 1,
        }
        stats
    });
    stats.active = stats.total - stats.completed;
    stats
}
