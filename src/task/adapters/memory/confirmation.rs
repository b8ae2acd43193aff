//! Scripted delete confirmation.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::task::ports::DeleteConfirmation;

/// Confirmation that always gives the same answer and remembers each prompt.
#[derive(Debug, Clone)]
pub struct StaticConfirmation {
    answer: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl StaticConfirmation {
    /// Creates a confirmation that answers `answer` to every prompt.
    #[must_use]
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a confirmation that agrees to every prompt.
    #[must_use]
    pub fn accepting() -> Self {
        Self::new(true)
    }

    /// Creates a confirmation that declines every prompt.
    #[must_use]
    pub fn declining() -> Self {
        Self::new(false)
    }

    /// Returns the prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DeleteConfirmation for StaticConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_owned());
        self.answer
    }
}
