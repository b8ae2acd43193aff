//! Drag gesture state machine for moving tasks between board columns.
//!
//! The gesture is a plain value with pure transitions. Callers hold the
//! current [`DragState`], feed it events, and act on the returned
//! [`DropDecision`]; nothing here talks to the store.

use super::{DragError, Task, TaskId, TaskStatus};

/// Current drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No task is being dragged.
    #[default]
    Idle,
    /// A task has been picked up.
    Dragging {
        /// Task being dragged.
        task_id: TaskId,
        /// Column the task was in when the drag started.
        status: TaskStatus,
    },
}

/// What a drop onto a column means for the dragged task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDecision {
    /// Nothing was being dragged.
    NoActiveDrag,
    /// The task was dropped back onto its own column.
    SameStatus {
        /// Task that was dropped.
        task_id: TaskId,
        /// Column it already belongs to.
        status: TaskStatus,
    },
    /// The task should move to a different column.
    Move {
        /// Task to move.
        task_id: TaskId,
        /// Column the task is leaving.
        from: TaskStatus,
        /// Column the task was dropped on.
        to: TaskStatus,
    },
}

impl DropDecision {
    /// Returns `true` when the drop requires a store update.
    #[must_use]
    pub const fn requires_update(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

impl DragState {
    /// Picks up `task`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] when another drag is active.
    pub const fn begin(self, task: &Task) -> Result<Self, DragError> {
        match self {
            Self::Idle => Ok(Self::Dragging {
                task_id: task.id(),
                status: task.status(),
            }),
            Self::Dragging { task_id, .. } => Err(DragError::AlreadyDragging {
                active: task_id,
                requested: task.id(),
            }),
        }
    }

    /// Ends the gesture, whether it completed or was cancelled.
    #[must_use]
    pub const fn end(self) -> Self {
        Self::Idle
    }

    /// Interprets a drop onto the column for `target`.
    #[must_use]
    pub fn drop_on(self, target: TaskStatus) -> DropDecision {
        match self {
            Self::Idle => DropDecision::NoActiveDrag,
            Self::Dragging { task_id, status } if status == target => {
                DropDecision::SameStatus { task_id, status }
            }
            Self::Dragging { task_id, status } => DropDecision::Move {
                task_id,
                from: status,
                to: target,
            },
        }
    }

    /// Returns the dragged task, if any.
    #[must_use]
    pub const fn active_task(self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { task_id, .. } => Some(task_id),
        }
    }
}
