//! List filter criterion.

use crate::model::filter::TodoFilter;
use crate::model::todo::Todo;

/// Returns whether `todo` passes `filter`.
pub fn matches_filter(todo: &Todo, filter: TodoFilter) -> bool {
    match filter {
        TodoFilter::All => true,
        TodoFilter::Active => todo.is_active(),
        TodoFilter::Completed => !todo.is_active(),
    }
}

/// Keeps todos passing `filter`, preserving collection order.
pub fn filter_by_criterion(todos: &[Todo], filter: TodoFilter) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| matches_filter(todo, filter))
        .cloned()
        .collect()
}
