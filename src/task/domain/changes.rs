//! Validated change sets sent to the remote store.

use super::{TaskPriority, TaskStatus, TaskTitle};

/// Fields for creating a task.
///
/// New tasks always start in [`TaskStatus::Todo`]; the status is not part of
/// the change set and is fixed when the request is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
}

impl NewTask {
    /// Creates a change set with the default priority and no description.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
        }
    }

    /// Sets the description.
    ///
    /// The value is trimmed; a blank description is dropped so the created
    /// task has no description at all.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        let trimmed = description.as_ref().trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status every new task is created with.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::Todo
    }
}

/// Change applied to a task description by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionChange {
    /// Replace the description with this value, which may be empty.
    Set(String),
    /// Remove the description so the task has none.
    Clear,
}

/// Partial update of a task. Fields left as `None` are not changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<DescriptionChange>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only moves the task to `status`.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self::new().with_status(status)
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description with `description`, kept verbatim.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(DescriptionChange::Set(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(DescriptionChange::Clear);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the description change, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&DescriptionChange> {
        self.description.as_ref()
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}
