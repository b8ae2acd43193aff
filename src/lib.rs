//! Taskboard: task state synchronization for a single-board task tracker.
//!
//! Users create tasks, move them between three fixed columns (todo,
//! in-progress, done) by drag and drop, and edit or delete them inline. This
//! crate implements the layer between those actions and the remote store
//! that owns the tasks: a repository client, an invalidate-and-refetch task
//! cache, a drag-and-drop transition controller, and the board projection.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the store, notifications, and
//!   delete confirmation
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`config`]: Remote store settings loaded from the environment
//! - [`task`]: Task domain, cache, and board services

pub mod config;
pub mod task;
