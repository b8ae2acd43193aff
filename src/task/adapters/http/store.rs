//! Remote task store reached over the `/api/tasks` REST routes.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, instrument, warn};

use super::models::{CreateTaskBody, TaskRecord, UpdateTaskBody};
use crate::config::StoreConfig;
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// HTTP client for the remote task store.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    tasks_url: String,
}

impl HttpTaskStore {
    /// Creates a store client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &StoreConfig) -> TaskStoreResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(TaskStoreError::transport)?;
        Ok(Self {
            client,
            tasks_url: tasks_url(&config.base_url),
        })
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/{id}", self.tasks_url)
    }
}

/// Resolves the task collection route against `base_url`.
fn tasks_url(base_url: &str) -> String {
    format!("{}/api/tasks", base_url.trim().trim_end_matches('/'))
}

/// Maps a non-success status to a store error.
fn status_error(status: u16, id: Option<TaskId>) -> TaskStoreError {
    match (status, id) {
        (404, Some(task_id)) => TaskStoreError::NotFound(task_id),
        _ => TaskStoreError::Rejected { status },
    }
}

/// Sends `request`, treating every non-2xx status as a failure.
async fn send(request: RequestBuilder, id: Option<TaskId>) -> TaskStoreResult<Response> {
    let response = request.send().await.map_err(TaskStoreError::transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(status = status.as_u16(), "task store rejected request");
    Err(status_error(status.as_u16(), id))
}

async fn read_task(response: Response) -> TaskStoreResult<Task> {
    let record = response
        .json::<TaskRecord>()
        .await
        .map_err(TaskStoreError::transport)?;
    record_to_task(record)
}

/// Normalizes a store record into a [`Task`].
///
/// # Errors
///
/// Returns [`TaskStoreError::InvalidRecord`] when any field violates the task
/// invariants.
pub(super) fn record_to_task(record: TaskRecord) -> TaskStoreResult<Task> {
    let invalid = |err: &dyn std::fmt::Display| {
        TaskStoreError::InvalidRecord(format!("task {}: {err}", record.id))
    };
    let id = TaskId::new(record.id).map_err(|err| invalid(&err))?;
    let title = TaskTitle::new(record.title.as_str()).map_err(|err| invalid(&err))?;
    let priority = TaskPriority::try_from(record.priority.as_str()).map_err(|err| invalid(&err))?;
    let status = TaskStatus::try_from(record.status.as_str()).map_err(|err| invalid(&err))?;

    Ok(Task::from_persisted(PersistedTaskData {
        id,
        title,
        description: record.description,
        priority,
        status,
        updated_at: record.updated_at,
    }))
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    #[instrument(skip_all)]
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let response = send(self.client.get(&self.tasks_url), None).await?;
        let records = response
            .json::<Vec<TaskRecord>>()
            .await
            .map_err(TaskStoreError::transport)?;
        debug!(count = records.len(), "listed tasks");
        records.into_iter().map(record_to_task).collect()
    }

    #[instrument(skip_all)]
    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task> {
        let body = CreateTaskBody::from(task);
        let response = send(self.client.post(&self.tasks_url).json(&body), None).await?;
        let created = read_task(response).await?;
        debug!(task_id = %created.id(), "created task");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(task_id = %id))]
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let body = UpdateTaskBody::from(patch);
        let response = send(self.client.patch(self.task_url(id)).json(&body), Some(id)).await?;
        read_task(response).await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        send(self.client.delete(self.task_url(id)), Some(id)).await?;
        Ok(())
    }
}
