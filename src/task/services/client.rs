//! Repository client: validated create/read/update/delete against the store.

use crate::task::{
    domain::{
        DescriptionChange, NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskPriority,
        TaskStatus, TaskTitle,
    },
    ports::{TaskStore, TaskStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
        }
    }

    /// Sets the description. Blank descriptions are not sent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let mut task = NewTask::new(TaskTitle::new(self.title)?).with_priority(self.priority);
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        Ok(task)
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<DescriptionChange>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title; it must be non-empty after trimming.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description verbatim, including with an empty string.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(DescriptionChange::Set(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(DescriptionChange::Clear);
        self
    }

    /// Moves the task to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        patch = match self.description {
            Some(DescriptionChange::Set(value)) => patch.with_description(value),
            Some(DescriptionChange::Clear) => patch.clear_description(),
            None => patch,
        };
        if let Some(status) = self.status {
            patch = patch.with_status(status);
        }
        if let Some(priority) = self.priority {
            patch = patch.with_priority(priority);
        }
        Ok(patch)
    }
}

/// Errors returned by the repository client.
#[derive(Debug, Clone, Error)]
pub enum TaskClientError {
    /// Input was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// The store round trip failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl TaskClientError {
    /// Returns `true` when the error was raised before reaching the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for repository client operations.
pub type TaskClientResult<T> = Result<T, TaskClientError>;

/// Client for the remote task store.
///
/// Every operation is a single round trip with no retries. Validation
/// failures are reported without touching the store.
pub struct TaskRepositoryClient<S> {
    store: Arc<S>,
}

impl<S> Clone for TaskRepositoryClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> TaskRepositoryClient<S>
where
    S: TaskStore,
{
    /// Creates a client over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetches every task in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Store`] when the round trip fails.
    pub async fn list(&self) -> TaskClientResult<Vec<Task>> {
        let tasks = self.store.list().await.inspect_err(|err| {
            warn!(error = %err, "listing tasks failed");
        })?;
        debug!(count = tasks.len(), "fetched task list");
        Ok(tasks)
    }

    /// Creates a task in the todo column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Validation`] for a blank title, without
    /// contacting the store, or [`TaskClientError::Store`] when the round
    /// trip fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskClientResult<Task> {
        let new_task = request.into_new_task()?;
        let created = self.store.create(&new_task).await.inspect_err(|err| {
            warn!(error = %err, "creating task failed");
        })?;
        debug!(task_id = %created.id(), "created task");
        Ok(created)
    }

    /// Applies a partial update to the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Validation`] when a supplied title is
    /// blank, or [`TaskClientError::Store`] when the round trip fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskClientResult<Task> {
        let patch = request.into_patch()?;
        let updated = self.store.update(id, &patch).await.inspect_err(|err| {
            warn!(task_id = %id, error = %err, "updating task failed");
        })?;
        debug!(task_id = %id, status = %updated.status(), "updated task");
        Ok(updated)
    }

    /// Deletes the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Store`] when the round trip fails,
    /// including when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskClientResult<()> {
        self.store.delete(id).await.inspect_err(|err| {
            warn!(task_id = %id, error = %err, "deleting task failed");
        })?;
        debug!(task_id = %id, "deleted task");
        Ok(())
    }
}
