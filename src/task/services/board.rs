//! Task board: the composition root behind the user-facing board actions.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::cache::{CacheSnapshot, Committed, QueryKey, RefetchOutcome, TaskCache};
use super::client::{CreateTaskRequest, TaskClientResult, TaskRepositoryClient, UpdateTaskRequest};
use super::transition::{DropResult, TransitionController, TransitionError};
use crate::config::StoreConfig;
use crate::task::{
    adapters::{TracingNotifier, http::HttpTaskStore},
    domain::{BoardCounts, BoardProjection, DragError, Task, TaskId, TaskStatus},
    ports::{DeleteConfirmation, Notification, Notifier, TaskStore, TaskStoreResult},
};

/// Prompt shown before a task is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Inline edit of a task's title and, optionally, its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    title: String,
    description: Option<String>,
}

impl TaskEdit {
    /// Creates an edit that replaces the title and leaves the description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Replaces the description with the trimmed value.
    ///
    /// A blank value is stored as an empty description, not removed.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn into_request(self) -> UpdateTaskRequest {
        let request = UpdateTaskRequest::new().with_title(self.title);
        let Some(description) = self.description else {
            return request;
        };
        request.with_description(description.trim())
    }
}

/// Outcome of a delete request.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The task was deleted and the cache is refetching.
    Deleted(Committed<TaskId>),
}

/// Board columns and counts derived from one cache snapshot.
#[derive(Debug, Clone)]
pub struct BoardView {
    /// Tasks partitioned by status.
    pub projection: BoardProjection,
    /// Column and total counts.
    pub counts: BoardCounts,
    /// `true` until the first fetch has settled.
    pub is_loading: bool,
}

impl From<&CacheSnapshot> for BoardView {
    fn from(snapshot: &CacheSnapshot) -> Self {
        let projection = snapshot.projection();
        let counts = projection.counts();
        Self {
            projection,
            counts,
            is_loading: snapshot.is_loading(),
        }
    }
}

/// Single task board wired to one store, one cache, and one drag controller.
///
/// Every successful mutation invalidates the cache; every outcome is
/// reported through the notifier.
pub struct TaskBoard<S, N, C> {
    client: TaskRepositoryClient<S>,
    cache: TaskCache<S>,
    transitions: TransitionController<S>,
    notifier: Arc<N>,
    confirmation: Arc<C>,
}

impl<S, N, C> TaskBoard<S, N, C>
where
    S: TaskStore + 'static,
    N: Notifier,
    C: DeleteConfirmation,
{
    /// Creates a board over `store` with its own cache.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>, confirmation: Arc<C>) -> Self {
        let client = TaskRepositoryClient::new(store);
        let cache = TaskCache::new(QueryKey::default(), client.clone());
        let transitions = TransitionController::new(client.clone(), cache.clone());
        Self {
            client,
            cache,
            transitions,
            notifier,
            confirmation,
        }
    }

    /// Returns the board's cache.
    #[must_use]
    pub const fn cache(&self) -> &TaskCache<S> {
        &self.cache
    }

    /// Fetches the task list and waits for it to settle.
    pub async fn load(&self) -> RefetchOutcome {
        self.cache.refresh().await
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CacheSnapshot {
        self.cache.read()
    }

    /// Subscribes to snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CacheSnapshot> {
        self.cache.subscribe()
    }

    /// Returns the board columns for the current snapshot.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::from(&self.cache.read())
    }

    /// Creates a task in the todo column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError`](super::TaskClientError) when the title is blank or the store
    /// rejects the request.
    pub async fn add_task(
        &self,
        request: CreateTaskRequest,
    ) -> TaskClientResult<Committed<Task>> {
        match self.client.create(request).await {
            Ok(task) => {
                info!(task_id = %task.id(), "task created");
                self.notifier
                    .notify(Notification::success("Task created successfully"));
                Ok(Committed::new(task, self.cache.invalidate()))
            }
            Err(err) => {
                let message = if err.is_validation() {
                    "Task title is required"
                } else {
                    "Failed to create task"
                };
                self.notifier.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    /// Saves an inline edit of the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError`](super::TaskClientError) when the title is blank or the store
    /// rejects the request.
    pub async fn edit_task(
        &self,
        id: TaskId,
        edit: TaskEdit,
    ) -> TaskClientResult<Committed<Task>> {
        match self.client.update(id, edit.into_request()).await {
            Ok(task) => {
                info!(task_id = %id, "task updated");
                self.notifier
                    .notify(Notification::success("Task updated successfully"));
                Ok(Committed::new(task, self.cache.invalidate()))
            }
            Err(err) => {
                let message = if err.is_validation() {
                    "Task title cannot be empty"
                } else {
                    "Failed to update task"
                };
                self.notifier.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    /// Deletes the task with `id` once the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`TaskClientError::Store`](super::TaskClientError::Store) when the store rejects the delete,
    /// including when the task does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TaskClientResult<DeleteOutcome> {
        if !self.confirmation.confirm(DELETE_PROMPT).await {
            debug!(task_id = %id, "delete cancelled by user");
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.client.delete(id).await {
            Ok(()) => {
                info!(task_id = %id, "task deleted");
                self.notifier
                    .notify(Notification::success("Task deleted successfully"));
                Ok(DeleteOutcome::Deleted(Committed::new(
                    id,
                    self.cache.invalidate(),
                )))
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Failed to delete task"));
                Err(err)
            }
        }
    }

    /// Picks up `task` for dragging.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] when another drag is active.
    pub fn begin_drag(&self, task: &Task) -> Result<(), DragError> {
        self.transitions.begin_drag(task)
    }

    /// Ends the current drag gesture.
    pub fn end_drag(&self) {
        self.transitions.end_drag();
    }

    /// Drops the dragged task onto the column for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when the status update fails.
    pub async fn drop_on(&self, target: TaskStatus) -> Result<DropResult, TransitionError> {
        match self.transitions.drop_on(target).await {
            Ok(result) => {
                if result.is_moved() {
                    self.notifier.notify(Notification::success(format!(
                        "Task moved to {}",
                        target.label()
                    )));
                }
                Ok(result)
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Failed to move task"));
                Err(err)
            }
        }
    }
}

impl<C> TaskBoard<HttpTaskStore, TracingNotifier, C>
where
    C: DeleteConfirmation,
{
    /// Creates a board backed by the HTTP store at `config.base_url` that
    /// reports outcomes as `tracing` events.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`](crate::task::ports::TaskStoreError::Transport)
    /// when the HTTP client cannot be built.
    pub fn connect(config: &StoreConfig, confirmation: Arc<C>) -> TaskStoreResult<Self> {
        let store = HttpTaskStore::new(config)?;
        Ok(Self::new(
            Arc::new(store),
            Arc::new(TracingNotifier),
            confirmation,
        ))
    }
}
