//! Application services for the task board.
//!
//! - [`client`]: validated round trips to the remote store
//! - [`cache`]: invalidate-and-refetch snapshot of the task list
//! - [`transition`]: drag-and-drop status transitions
//! - [`board`]: composition root tying the above to notifications and
//!   delete confirmation

pub mod board;
pub mod cache;
pub mod client;
pub mod transition;

pub use board::{BoardView, DELETE_PROMPT, DeleteOutcome, TaskBoard, TaskEdit};
pub use cache::{
    CacheSnapshot, Committed, QueryKey, RefetchHandle, RefetchOutcome, TASKS_QUERY_KEY, TaskCache,
};
pub use client::{
    CreateTaskRequest, TaskClientError, TaskClientResult, TaskRepositoryClient, UpdateTaskRequest,
};
pub use transition::{DropResult, TransitionController, TransitionError};
