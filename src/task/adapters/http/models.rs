//! JSON payloads exchanged with the `/api/tasks` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::domain::{DescriptionChange, NewTask, TaskPatch};

/// Task record as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Title as stored.
    pub title: String,
    /// Description; `null` when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority string (`low`, `medium`, `high`).
    pub priority: String,
    /// Status string (`todo`, `in-progress`, `done`).
    pub status: String,
    /// Timestamp of the latest create or update.
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskBody {
    /// Trimmed title.
    pub title: String,
    /// Description, omitted when blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority string.
    pub priority: &'static str,
    /// Always `todo`.
    pub status: &'static str,
}

impl From<&NewTask> for CreateTaskBody {
    fn from(task: &NewTask) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority().as_str(),
            status: task.status().as_str(),
        }
    }
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// Unchanged fields are omitted. A cleared description is sent as `null`,
/// which the store distinguishes from an omitted one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description change: outer `None` omits, inner `None` clears.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New status string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// New priority string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
}

impl From<&TaskPatch> for UpdateTaskBody {
    fn from(patch: &TaskPatch) -> Self {
        let description = patch.description().map(|change| match change {
            DescriptionChange::Set(value) => Some(value.clone()),
            DescriptionChange::Clear => None,
        });

        Self {
            title: patch.title().map(|title| title.as_str().to_owned()),
            description,
            status: patch.status().map(|status| status.as_str()),
            priority: patch.priority().map(|priority| priority.as_str()),
        }
    }
}
