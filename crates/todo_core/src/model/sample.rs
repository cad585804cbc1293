//! Built-in sample collection for demos and empty boards.

use crate::model::todo::{Priority, Todo, TodoId, TodoStatus};
use chrono::{DateTime, Duration, SubsecRound, Utc};

const SAMPLES: &[(&str, &str, i64, TodoStatus, Priority)] = &[
    ("sample-1", "Draft the project proposal", 24, TodoStatus::Todo, Priority::High),
    ("sample-2", "Design the API and write its docs", 12, TodoStatus::InProgress, Priority::High),
    ("sample-3", "Build the UI/UX mockups", 6, TodoStatus::InProgress, Priority::Medium),
    ("sample-4", "Finish the database design", 48, TodoStatus::Done, Priority::Medium),
    ("sample-5", "Set up the development environment", 72, TodoStatus::Done, Priority::Low),
    ("sample-6", "Run the code review", 2, TodoStatus::Todo, Priority::Medium),
];

/// Returns the fixed sample todos, aged relative to `now`.
///
/// Ids are stable (`sample-1`..`sample-6`) so repeated loads can be
/// deduplicated.
pub fn sample_todos(now: DateTime<Utc>) -> Vec<Todo> {
    let now = now.trunc_subsecs(3);
    SAMPLES
        .iter()
        .map(|(id, text, hours_ago, status, priority)| Todo {
            id: TodoId::from(*id),
            text: (*text).to_string(),
            completed: *status == TodoStatus::Done,
            created_at: now - Duration::hours(*hours_ago),
            status: *status,
            priority: *priority,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sample_todos;
    use chrono::Utc;

    #[test]
    fn samples_satisfy_record_invariants() {
        let samples = sample_todos(Utc::now());
        assert_eq!(samples.len(), 6);
        for todo in &samples {
            todo.validate().unwrap();
        }
    }
}
