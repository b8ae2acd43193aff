//! HTTP adapter for the remote task store.

mod models;
mod store;

pub use models::{CreateTaskBody, TaskRecord, UpdateTaskBody};
pub use store::HttpTaskStore;
