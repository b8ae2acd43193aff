//! Adapter implementations of the task board ports.

pub mod http;
pub mod memory;
mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
