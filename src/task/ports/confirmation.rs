//! Port for asking the user to confirm destructive actions.

use async_trait::async_trait;

/// Asks the user whether a task should really be deleted.
#[async_trait]
pub trait DeleteConfirmation: Send + Sync {
    /// Shows `prompt` and resolves to `true` only if the user agreed.
    async fn confirm(&self, prompt: &str) -> bool;
}
