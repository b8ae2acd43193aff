//! Status-partitioned projection of a task list.

use super::{Task, TaskId, TaskStatus};

/// Task counts shown alongside the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardCounts {
    /// Number of tasks on the board.
    pub total: usize,
    /// Tasks in the todo column.
    pub todo: usize,
    /// Tasks in the in-progress column.
    pub in_progress: usize,
    /// Tasks in the done column.
    pub done: usize,
}

/// Three board columns derived from a task list.
///
/// Every task lands in exactly one column, and each column keeps the order
/// of the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardProjection {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl BoardProjection {
    /// Partitions `tasks` by status.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut projection = Self::default();
        for task in tasks {
            projection.column_mut(task.status()).push(task.clone());
        }
        projection
    }

    /// Returns the tasks in the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Returns the todo column.
    #[must_use]
    pub fn todo(&self) -> &[Task] {
        &self.todo
    }

    /// Returns the in-progress column.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns the done column.
    #[must_use]
    pub fn done(&self) -> &[Task] {
        &self.done
    }

    /// Returns the per-column and total counts.
    #[must_use]
    pub fn counts(&self) -> BoardCounts {
        let todo = self.todo.len();
        let in_progress = self.in_progress.len();
        let done = self.done.len();
        BoardCounts {
            total: todo + in_progress + done,
            todo,
            in_progress,
            done,
        }
    }

    /// Returns the column holding the task with `id`, if present.
    #[must_use]
    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| self.column(*status).iter().any(|task| task.id() == id))
    }
}
