//! Unit tests for the task board domain and services.


use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub(super) fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a task as the store would report it.
pub(super) fn stored_task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id).expect("valid task id"),
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        priority: TaskPriority::Medium,
        status,
        updated_at: FixedClock::at(2025, 6, 1, 9).utc(),
    })
}

pub(super) fn task_id(value: i64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}
