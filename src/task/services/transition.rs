//! Drag-and-drop controller that turns drops into status updates.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use super::cache::{Committed, TaskCache};
use super::client::{TaskClientError, TaskRepositoryClient, UpdateTaskRequest};
use crate::task::{
    domain::{DragError, DragState, DropDecision, Task, TaskStatus},
    ports::TaskStore,
};

/// Errors returned by the transition controller.
#[derive(Debug, Clone, Error)]
pub enum TransitionError {
    /// The drag gesture was used out of order.
    #[error(transparent)]
    Drag(#[from] DragError),
    /// The status update failed.
    #[error(transparent)]
    Client(#[from] TaskClientError),
}

/// What a drop did.
#[derive(Debug)]
pub enum DropResult {
    /// No update was sent; the decision says why.
    Ignored(DropDecision),
    /// The task moved and the cache is refetching.
    Moved(Committed<Task>),
}

impl DropResult {
    /// Returns `true` when the drop moved a task.
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Tracks the active drag and applies drops through the repository client.
///
/// At most one task is dragged at a time. Dropping a task onto its own column
/// sends nothing to the store.
pub struct TransitionController<S> {
    drag: Mutex<DragState>,
    client: TaskRepositoryClient<S>,
    cache: TaskCache<S>,
}

impl<S> TransitionController<S>
where
    S: TaskStore + 'static,
{
    /// Creates an idle controller.
    #[must_use]
    pub fn new(client: TaskRepositoryClient<S>, cache: TaskCache<S>) -> Self {
        Self {
            drag: Mutex::new(DragState::Idle),
            client,
            cache,
        }
    }

    /// Returns the current gesture state.
    #[must_use]
    pub fn state(&self) -> DragState {
        *self.drag.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Picks up `task`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] when another drag is active;
    /// the active drag is left untouched.
    pub fn begin_drag(&self, task: &Task) -> Result<(), DragError> {
        let mut drag = self.drag.lock().unwrap_or_else(PoisonError::into_inner);
        *drag = drag.begin(task)?;
        debug!(task_id = %task.id(), status = %task.status(), "drag started");
        Ok(())
    }

    /// Ends the gesture, completed or cancelled.
    pub fn end_drag(&self) {
        let mut drag = self.drag.lock().unwrap_or_else(PoisonError::into_inner);
        *drag = drag.end();
    }

    /// Drops the dragged task onto the column for `target`.
    ///
    /// The gesture is cleared before the update is sent, so it is idle again
    /// whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Client`] when the update fails; the cache
    /// is not invalidated in that case.
    pub async fn drop_on(&self, target: TaskStatus) -> Result<DropResult, TransitionError> {
        let state = {
            let mut drag = self.drag.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *drag)
        };

        let decision = state.drop_on(target);
        let DropDecision::Move { task_id, from, to } = decision else {
            debug!(?decision, "drop ignored");
            return Ok(DropResult::Ignored(decision));
        };

        let request = UpdateTaskRequest::new().with_status(to);
        let moved = self.client.update(task_id, request).await?;
        debug!(task_id = %task_id, %from, %to, "task moved");
        let refetch = self.cache.invalidate();
        Ok(DropResult::Moved(Committed::new(moved, refetch)))
    }
}
