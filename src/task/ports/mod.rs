//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services: the
//! remote store, the notification surface, and delete confirmation.

pub mod confirmation;
pub mod notifier;
pub mod store;

pub use confirmation::DeleteConfirmation;
pub use notifier::{Notification, NotificationKind, Notifier};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use store::MockTaskStore;
