//! Kanban board grouping.
//!
//! # Invariants
//! - Exactly three columns, one per `TodoStatus`, in board order.
//! - Within a column: priority descending, then `createdAt` descending.

use crate::model::todo::{Todo, TodoStatus};

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumn {
    pub status: TodoStatus,
    pub cards: Vec<Todo>,
}

impl KanbanColumn {
    /// Display title.
    pub fn title(&self) -> &'static str {
        column_title(self.status)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub fn column_title(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::Todo => "TODO",
        TodoStatus::InProgress => "IN PROGRESS",
        TodoStatus::Done => "DONE",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanBoard {
    pub todo: KanbanColumn,
    pub in_progress: KanbanColumn,
    pub done: KanbanColumn,
}

impl KanbanBoard {
    pub fn column(&self, status: TodoStatus) -> &KanbanColumn {
        match status {
            TodoStatus::Todo => &self.todo,
            TodoStatus::InProgress => &self.in_progress,
            TodoStatus::Done => &self.done,
        }
    }

    /// Columns in display order.
    pub fn columns(&self) -> [&KanbanColumn; 3] {
        [&self.todo, &self.in_progress, &self.done]
    }

    pub fn total_cards(&self) -> usize {
        self.columns().iter().map(|column| column.len()).sum()
    }
}

/// Partitions `todos` by status and orders each column.
pub fn kanban_grouping(todos: &[Todo]) -> KanbanBoard {
    let column = |status: TodoStatus| {
        let mut cards: Vec<Todo> = todos
            .iter()
            .filter(|todo| todo.status == status)
            .cloned()
            .collect();
        cards.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        KanbanColumn { status, cards }
    };

    KanbanBoard {
        todo: column(TodoStatus::Todo),
        in_progress: column(TodoStatus::InProgress),
        done: column(TodoStatus::Done),
    }
}
