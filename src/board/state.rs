//! Tasks grouped into status columns.

use crate::task::domain::{Task, TaskId, TaskStatus};
use serde::Serialize;

/// Display-ready projection of the store: one ordered column per status.
///
/// Column order follows the store listing, so tasks stay in creation order
/// within each column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardState {
    todo: Vec<Task>,
    doing: Vec<Task>,
    done: Vec<Task>,
}

impl BoardState {
    /// Partitions an ordered task listing into status columns.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut state = Self::default();
        for task in tasks {
            state.column_mut(task.status()).push(task);
        }
        state
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Done => &self.done,
        }
    }

    const fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Iterates over the columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Returns the number of tasks in one column.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.column(status).len()
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn total(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Finds a task by identifier in any column.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.columns()
            .flat_map(|(_, tasks)| tasks.iter())
            .find(|task| task.id() == id)
    }
}
