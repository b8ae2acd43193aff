//! Port for the remote task store, the sole source of truth for tasks.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Request/response contract of the remote task store.
///
/// Each method is exactly one round trip. Implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task in store order.
    async fn list(&self) -> TaskStoreResult<Vec<Task>>;

    /// Creates a task and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the store rejects the request or
    /// cannot be reached.
    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task>;

    /// Applies `patch` to the task and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task>;

    /// Deletes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by remote store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store answered with a non-success status.
    #[error("store rejected the request with status {status}")]
    Rejected {
        /// Status code reported by the store.
        status: u16,
    },

    /// The store returned a record that does not form a valid task.
    #[error("invalid task record: {0}")]
    InvalidRecord(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
