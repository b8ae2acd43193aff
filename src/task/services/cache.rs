//! Task cache: the last known-good task list, refreshed by invalidation.
//!
//! The cache never patches tasks locally. Every change to the snapshot comes
//! from a full refetch through the repository client, and each refetch is
//! stamped with a sequence number so that a slow, earlier refetch cannot
//! overwrite the result of a later one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::client::{TaskClientError, TaskClientResult, TaskRepositoryClient};
use crate::task::{
    domain::{BoardProjection, Task, TaskId},
    ports::TaskStore,
};

/// Query identity of the single board's task list.
pub const TASKS_QUERY_KEY: &str = "/api/tasks";

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Creates a key from `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QueryKey {
    fn default() -> Self {
        Self::new(TASKS_QUERY_KEY)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time view of the cache.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    tasks: Arc<Vec<Task>>,
    version: u64,
    is_loading: bool,
    is_stale: bool,
    last_error: Option<TaskClientError>,
}

impl CacheSnapshot {
    fn empty() -> Self {
        Self {
            tasks: Arc::new(Vec::new()),
            version: 0,
            is_loading: true,
            is_stale: true,
            last_error: None,
        }
    }

    /// Returns the cached tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the cached task with `id`, if present.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the sequence number of the refetch that produced the tasks.
    ///
    /// Zero means no refetch has succeeded yet.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` until the first refetch has settled.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns `true` while a newer refetch than the current data is pending
    /// or has failed.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.is_stale
    }

    /// Returns the error of the most recent failed refetch, cleared by the
    /// next successful one.
    #[must_use]
    pub const fn last_error(&self) -> Option<&TaskClientError> {
        self.last_error.as_ref()
    }

    /// Partitions the cached tasks into board columns.
    #[must_use]
    pub fn projection(&self) -> BoardProjection {
        BoardProjection::from_tasks(&self.tasks)
    }
}

/// How a refetch ended.
#[derive(Debug, Clone)]
pub enum RefetchOutcome {
    /// The fetched list replaced the snapshot.
    Applied {
        /// Snapshot version after the refetch.
        version: u64,
    },
    /// A later refetch had already been applied; this result was dropped.
    Superseded {
        /// Sequence number of the dropped refetch.
        sequence: u64,
    },
    /// The store round trip failed; the previous snapshot is kept.
    Failed(TaskClientError),
    /// The cache was dropped before the refetch resolved.
    Discarded,
    /// The refetch task was cancelled or panicked.
    Aborted,
}

impl RefetchOutcome {
    /// Returns `true` when the refetch replaced the snapshot.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Handle to a background refetch.
///
/// Dropping the handle does not cancel the refetch.
#[derive(Debug)]
pub struct RefetchHandle {
    sequence: u64,
    handle: JoinHandle<RefetchOutcome>,
}

impl RefetchHandle {
    /// Returns the sequence number stamped on this refetch.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Waits for the refetch to finish.
    pub async fn settled(self) -> RefetchOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(sequence = self.sequence, error = %err, "refetch task did not complete");
                RefetchOutcome::Aborted
            }
        }
    }
}

/// Result of a successful mutation together with the refetch it triggered.
#[derive(Debug)]
pub struct Committed<T> {
    value: T,
    refetch: RefetchHandle,
}

impl<T> Committed<T> {
    pub(crate) const fn new(value: T, refetch: RefetchHandle) -> Self {
        Self { value, refetch }
    }

    /// Returns the value the store answered with.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Splits into the value and the pending refetch.
    #[must_use]
    pub fn into_parts(self) -> (T, RefetchHandle) {
        (self.value, self.refetch)
    }

    /// Waits for the refetch and returns the value with its outcome.
    pub async fn settled(self) -> (T, RefetchOutcome) {
        let outcome = self.refetch.settled().await;
        (self.value, outcome)
    }
}

struct CacheInner<S> {
    key: QueryKey,
    client: TaskRepositoryClient<S>,
    snapshot: watch::Sender<CacheSnapshot>,
    issued: AtomicU64,
}

impl<S> CacheInner<S> {
    fn apply(&self, sequence: u64, result: TaskClientResult<Vec<Task>>) -> RefetchOutcome {
        let latest = self.issued.load(Ordering::SeqCst);
        let mut outcome = RefetchOutcome::Superseded { sequence };

        self.snapshot.send_if_modified(|snapshot| {
            if sequence <= snapshot.version {
                return false;
            }
            match result {
                Ok(tasks) => {
                    snapshot.tasks = Arc::new(tasks);
                    snapshot.version = sequence;
                    snapshot.is_loading = false;
                    snapshot.is_stale = sequence < latest;
                    snapshot.last_error = None;
                    outcome = RefetchOutcome::Applied { version: sequence };
                }
                Err(err) => {
                    if sequence == latest {
                        snapshot.is_loading = false;
                    }
                    snapshot.last_error = Some(err.clone());
                    outcome = RefetchOutcome::Failed(err);
                }
            }
            true
        });

        match &outcome {
            RefetchOutcome::Applied { version } => {
                debug!(query = %self.key, version, "task cache refreshed");
            }
            RefetchOutcome::Superseded { .. } => {
                debug!(query = %self.key, sequence, "dropping superseded refetch");
            }
            RefetchOutcome::Failed(err) => {
                warn!(query = %self.key, sequence, error = %err, "task cache refetch failed");
            }
            RefetchOutcome::Discarded | RefetchOutcome::Aborted => {}
        }
        outcome
    }
}

/// Cache of the full task list for one query key.
///
/// Clones share the same snapshot. The only way the snapshot changes is
/// [`TaskCache::invalidate`] followed by a successful refetch.
pub struct TaskCache<S> {
    inner: Arc<CacheInner<S>>,
}

impl<S> Clone for TaskCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> TaskCache<S>
where
    S: TaskStore + 'static,
{
    /// Creates an empty cache for `key` that refetches through `client`.
    #[must_use]
    pub fn new(key: QueryKey, client: TaskRepositoryClient<S>) -> Self {
        let (snapshot, _) = watch::channel(CacheSnapshot::empty());
        Self {
            inner: Arc::new(CacheInner {
                key,
                client,
                snapshot,
                issued: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the query key.
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.inner.key
    }

    /// Returns the current snapshot, which may be stale.
    #[must_use]
    pub fn read(&self) -> CacheSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribes to snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CacheSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Marks the snapshot stale and starts a background refetch.
    ///
    /// Readers keep seeing the current snapshot until the refetch resolves.
    /// Must be called from within a Tokio runtime.
    pub fn invalidate(&self) -> RefetchHandle {
        let sequence = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.snapshot.send_if_modified(|snapshot| {
            let was_stale = snapshot.is_stale;
            snapshot.is_stale = true;
            !was_stale
        });
        debug!(query = %self.inner.key, sequence, "task cache invalidated");

        let weak = Arc::downgrade(&self.inner);
        let client = self.inner.client.clone();
        let key = self.inner.key.clone();
        let handle = tokio::spawn(async move {
            let result = client.list().await;
            let Some(inner) = weak.upgrade() else {
                debug!(query = %key, sequence, "cache dropped before refetch resolved");
                return RefetchOutcome::Discarded;
            };
            inner.apply(sequence, result)
        });

        RefetchHandle { sequence, handle }
    }

    /// Invalidates and waits for the resulting refetch.
    pub async fn refresh(&self) -> RefetchOutcome {
        self.invalidate().settled().await
    }
}
