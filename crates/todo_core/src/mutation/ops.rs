//! Pure todo collection operations.
//!
//! Every function borrows the current collection and returns a fresh
//! [`Mutation`]. None of them can fail partway.

use crate::model::todo::{normalize_text, Priority, Todo, TodoId, TodoStatus};
use crate::mutation::{Mutation, NoopReason};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Prepends a new todo with default status/priority.
///
/// # Contract
/// - Blank `text` -> `NoopReason::BlankText`.
/// - `id` already present -> `NoopReason::DuplicateId`.
/// - Otherwise the new record is at index 0 with `completed = false`,
///   `status = todo`, `priority = medium`.
pub fn create(todos: &[Todo], text: &str, id: TodoId, created_at: DateTime<Utc>) -> Mutation {
    let Ok(todo) = Todo::new(id, text, created_at) else {
        return Mutation::noop(todos, NoopReason::BlankText);
    };
    if todos.iter().any(|existing| existing.id == todo.id) {
        return Mutation::noop(todos, NoopReason::DuplicateId);
    }

    let mut next = Vec::with_capacity(todos.len() + 1);
    next.push(todo);
    next.extend_from_slice(todos);
    Mutation::applied(next)
}

/// Replaces the text of one todo with the trimmed input.
pub fn edit(todos: &[Todo], id: &TodoId, text: &str) -> Mutation {
    let Some(text) = normalize_text(text) else {
        return Mutation::noop(todos, NoopReason::BlankText);
    };
    update_one(todos, id, |todo| {
        if todo.text == text {
            return false;
        }
        todo.text = text;
        true
    })
}

/// Removes one todo. Missing ids are a no-op.
pub fn delete(todos: &[Todo], id: &TodoId) -> Mutation {
    if !todos.iter().any(|todo| &todo.id == id) {
        return Mutation::noop(todos, NoopReason::NotFound);
    }
    Mutation::applied(todos.iter().filter(|todo| &todo.id != id).cloned().collect())
}

/// Flips `completed`, re-deriving `status` from it.
pub fn toggle(todos: &[Todo], id: &TodoId) -> Mutation {
    update_one(todos, id, |todo| {
        todo.set_completed(!todo.completed);
        true
    })
}

/// Sets `status`, re-deriving `completed` from it.
///
/// Setting the current status (for example dropping a kanban card on its own
/// column) is reported as `NoopReason::Unchanged`.
pub fn update_status(todos: &[Todo], id: &TodoId, status: TodoStatus) -> Mutation {
    update_one(todos, id, |todo| {
        if todo.status == status {
            return false;
        }
        todo.set_status(status);
        true
    })
}

pub fn update_priority(todos: &[Todo], id: &TodoId, priority: Priority) -> Mutation {
    update_one(todos, id, |todo| {
        if todo.priority == priority {
            return false;
        }
        todo.set_priority(priority);
        true
    })
}

/// Advances priority `low -> medium -> high -> low`.
pub fn cycle_priority(todos: &[Todo], id: &TodoId) -> Mutation {
    update_one(todos, id, |todo| {
        todo.cycle_priority();
        true
    })
}

/// Advances status `todo -> in-progress -> done -> todo`.
pub fn cycle_status(todos: &[Todo], id: &TodoId) -> Mutation {
    update_one(todos, id, |todo| {
        todo.cycle_status();
        true
    })
}

/// Drops every completed todo, keeping the relative order of the rest.
pub fn clear_completed(todos: &[Todo]) -> Mutation {
    if !todos.iter().any(|todo| todo.completed) {
        return Mutation::noop(todos, NoopReason::Unchanged);
    }
    Mutation::applied(todos.iter().filter(|todo| !todo.completed).cloned().collect())
}

/// Empties the collection once the caller has confirmed.
///
/// A declined confirmation returns the input unchanged.
pub fn clear_all(todos: &[Todo], confirmed: bool) -> Mutation {
    if !confirmed {
        return Mutation::noop(todos, NoopReason::Declined);
    }
    Mutation::applied(Vec::new())
}

/// Appends `samples` whose ids are not already present.
pub fn load_samples(todos: &[Todo], samples: Vec<Todo>, confirmed: bool) -> Mutation {
    if !confirmed {
        return Mutation::noop(todos, NoopReason::Declined);
    }

    let existing: HashSet<&TodoId> = todos.iter().map(|todo| &todo.id).collect();
    let fresh: Vec<Todo> = samples
        .into_iter()
        .filter(|sample| !existing.contains(&sample.id))
        .collect();
    if fresh.is_empty() {
        return Mutation::noop(todos, NoopReason::Unchanged);
    }

    let mut next = todos.to_vec();
    next.extend(fresh);
    Mutation::applied(next)
}

/// Applies `change` to the todo with `id`.
///
/// `change` returns `false` when the value it was asked to set is already
/// current.
fn update_one(todos: &[Todo], id: &TodoId, change: impl FnOnce(&mut Todo) -> bool) -> Mutation {
    let Some(index) = todos.iter().position(|todo| &todo.id == id) else {
        return Mutation::noop(todos, NoopReason::NotFound);
    };

    let mut next = todos.to_vec();
    if !change(&mut next[index]) {
        return Mutation::noop(todos, NoopReason::Unchanged);
    }
    Mutation::applied(next)
}
