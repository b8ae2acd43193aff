//! Behaviour of the in-memory task store.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::{InMemoryTaskStore, StoreOperation, StoreRequest},
    domain::{NewTask, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskStore, TaskStoreError},
};

#[derive(Debug, Clone, Copy)]
struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn frozen_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26)
        .single()
        .unwrap_or_default()
}

#[fixture]
fn store(frozen_at: DateTime<Utc>) -> InMemoryTaskStore<FrozenClock> {
    InMemoryTaskStore::with_clock(Arc::new(FrozenClock(frozen_at)))
}

fn new_task(title: &str) -> Result<NewTask, eyre::Report> {
    Ok(NewTask::new(TaskTitle::new(title)?))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_ascend_and_list_preserves_creation_order(
    store: InMemoryTaskStore<FrozenClock>,
    frozen_at: DateTime<Utc>,
) -> Result<(), eyre::Report> {
    let first = store.create(&new_task("First")?).await?;
    let second = store
        .create(&new_task("Second")?.with_priority(TaskPriority::Low))
        .await?;

    assert_eq!(first.id().value(), 1);
    assert_eq!(second.id().value(), 2);
    assert_eq!(second.priority(), TaskPriority::Low);
    assert_eq!(first.updated_at(), frozen_at);
    let listed: Vec<_> = store.list().await?.iter().map(|task| task.id()).collect();
    assert_eq!(listed, vec![first.id(), second.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_changes_only_named_fields(
    store: InMemoryTaskStore<FrozenClock>,
) -> Result<(), eyre::Report> {
    let created = store
        .create(&new_task("Describe me")?.with_description("original"))
        .await?;

    let moved = store
        .update(created.id(), &TaskPatch::status_only(TaskStatus::Done))
        .await?;
    assert_eq!(moved.description(), Some("original"));
    assert_eq!(moved.title().as_str(), "Describe me");

    let cleared = store
        .update(created.id(), &TaskPatch::new().clear_description())
        .await?;
    assert_eq!(cleared.description(), None);
    assert_eq!(cleared.status(), TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_tasks_are_not_found(
    store: InMemoryTaskStore<FrozenClock>,
) -> Result<(), eyre::Report> {
    let missing = TaskId::new(99)?;

    let updated = store
        .update(missing, &TaskPatch::status_only(TaskStatus::Todo))
        .await;
    let deleted = store.delete(missing).await;

    assert!(matches!(updated, Err(TaskStoreError::NotFound(id)) if id == missing));
    assert!(matches!(deleted, Err(TaskStoreError::NotFound(id)) if id == missing));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failure_applies_once_and_is_recorded(
    store: InMemoryTaskStore<FrozenClock>,
) -> Result<(), eyre::Report> {
    store.fail_next(StoreOperation::List, TaskStoreError::Rejected { status: 503 });

    let failed = store.list().await;
    let recovered = store.list().await;

    assert!(matches!(
        failed,
        Err(TaskStoreError::Rejected { status: 503 })
    ));
    assert!(recovered.is_ok());
    assert_eq!(store.requests(), vec![StoreRequest::List, StoreRequest::List]);
    Ok(())
}
