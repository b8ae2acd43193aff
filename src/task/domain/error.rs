//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),
}

/// Error returned while parsing task statuses from the wire or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from the wire or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Errors returned by drag gesture state transitions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DragError {
    /// A drag was started while another task is still being dragged.
    #[error("task {active} is already being dragged; cannot start dragging task {requested}")]
    AlreadyDragging {
        /// Task currently held by the gesture.
        active: TaskId,
        /// Task the new gesture tried to pick up.
        requested: TaskId,
    },
}
