//! In-memory adapters for tests and local composition.

mod confirmation;
mod notifier;
mod store;

pub use confirmation::StaticConfirmation;
pub use notifier::RecordingNotifier;
pub use store::{InMemoryTaskStore, StoreOperation, StoreRequest};
