//! In-memory remote store for tests and local composition.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tracing::debug;

use crate::task::{
    domain::{DescriptionChange, NewTask, PersistedTaskData, Task, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Kind of request received by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// List all tasks.
    List,
    /// Create a task.
    Create,
    /// Update a task.
    Update,
    /// Delete a task.
    Delete,
}

/// A request as received by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    /// `list()` was called.
    List,
    /// `create()` was called with these fields.
    Create(NewTask),
    /// `update()` was called for this task with this patch.
    Update(TaskId, TaskPatch),
    /// `delete()` was called for this task.
    Delete(TaskId),
}

impl StoreRequest {
    /// Returns the operation kind.
    #[must_use]
    pub const fn operation(&self) -> StoreOperation {
        match self {
            Self::List => StoreOperation::List,
            Self::Create(_) => StoreOperation::Create,
            Self::Update(..) => StoreOperation::Update,
            Self::Delete(_) => StoreOperation::Delete,
        }
    }
}

/// Thread-safe in-memory task store.
///
/// Ids are assigned in ascending order starting at 1 and tasks are listed in
/// creation order. Every request is recorded, including ones that fail.
/// Clones share the same underlying state.
pub struct InMemoryTaskStore<C = DefaultClock> {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryTaskStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
    requests: Vec<StoreRequest>,
    injected_failures: HashMap<StoreOperation, TaskStoreError>,
}

impl InMemoryTaskStore<DefaultClock> {
    /// Creates an empty store stamping tasks with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping tasks with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Makes the next `operation` request fail with `error`.
    ///
    /// The failure is consumed by the first matching request; later requests
    /// behave normally.
    pub fn fail_next(&self, operation: StoreOperation, error: TaskStoreError) {
        if let Ok(mut state) = self.state.write() {
            state.injected_failures.insert(operation, error);
        }
    }

    /// Returns every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.state
            .read()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    /// Returns how many `operation` requests have been received.
    #[must_use]
    pub fn request_count(&self, operation: StoreOperation) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.operation() == operation)
            .count()
    }

    /// Forgets recorded requests.
    pub fn clear_requests(&self) {
        if let Ok(mut state) = self.state.write() {
            state.requests.clear();
        }
    }

    fn write_state(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::transport(std::io::Error::other(err.to_string())))
    }

    /// Records `request` and returns the failure injected for it, if any.
    fn receive(
        &self,
        request: StoreRequest,
    ) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        let mut state = self.write_state()?;
        let operation = request.operation();
        state.requests.push(request);
        if let Some(error) = state.injected_failures.remove(&operation) {
            debug!(?operation, %error, "injected store failure");
            return Err(error);
        }
        Ok(state)
    }
}

/// Builds the task that results from applying `patch` to `current`.
fn apply_patch(current: &Task, patch: &TaskPatch, clock: &impl Clock) -> Task {
    let description = match patch.description() {
        None => current.description().map(str::to_owned),
        Some(DescriptionChange::Set(value)) => Some(value.clone()),
        Some(DescriptionChange::Clear) => None,
    };

    Task::from_persisted(PersistedTaskData {
        id: current.id(),
        title: patch.title().unwrap_or(current.title()).clone(),
        description,
        priority: patch.priority().unwrap_or(current.priority()),
        status: patch.status().unwrap_or(current.status()),
        updated_at: clock.utc(),
    })
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.receive(StoreRequest::List)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task> {
        let mut state = self.receive(StoreRequest::Create(task.clone()))?;
        let next = state.last_id + 1;
        let id =
            TaskId::new(next).map_err(|err| TaskStoreError::InvalidRecord(err.to_string()))?;
        state.last_id = next;

        let created = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            status: task.status(),
            updated_at: self.clock.utc(),
        });
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let mut state = self.receive(StoreRequest::Update(id, patch.clone()))?;
        let current = state.tasks.get(&id).ok_or(TaskStoreError::NotFound(id))?;
        let updated = apply_patch(current, patch, &*self.clock);
        state.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.receive(StoreRequest::Delete(id))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }
}
