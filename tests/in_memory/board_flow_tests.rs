//! End-to-end board flows over the in-memory store.

use std::sync::Arc;

use super::helpers::{BoardHarness, add_tasks, harness, titles};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::{StoreOperation, StoreRequest},
    domain::{TaskPatch, TaskStatus},
    ports::NotificationKind,
    services::{DeleteOutcome, DropResult, RefetchOutcome, TaskEdit},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_across_all_columns(harness: BoardHarness) -> Result<(), eyre::Report> {
    let BoardHarness {
        store,
        notifier,
        board,
    } = harness;
    let created = add_tasks(&board, &["Draft plan"]).await?;
    let task = created
        .first()
        .cloned()
        .ok_or_else(|| eyre::eyre!("expected a created task"))?;

    for target in [TaskStatus::InProgress, TaskStatus::Done] {
        let current = board
            .snapshot()
            .task(task.id())
            .cloned()
            .ok_or_else(|| eyre::eyre!("task missing from cache"))?;
        board.begin_drag(&current)?;
        let DropResult::Moved(committed) = board.drop_on(target).await? else {
            eyre::bail!("expected a move to {target}");
        };
        committed.settled().await;
    }

    let view = board.view();
    assert_eq!(titles(view.projection.done()), vec!["Draft plan"]);
    assert_eq!(view.counts.todo + view.counts.in_progress, 0);
    assert_eq!(
        notifier.messages(NotificationKind::Success),
        vec![
            "Task created successfully".to_owned(),
            "Task moved to in progress".to_owned(),
            "Task moved to done".to_owned(),
        ]
    );
    let updates: Vec<_> = store
        .requests()
        .into_iter()
        .filter(|request| request.operation() == StoreOperation::Update)
        .collect();
    assert_eq!(
        updates,
        vec![
            StoreRequest::Update(task.id(), TaskPatch::status_only(TaskStatus::InProgress)),
            StoreRequest::Update(task.id(), TaskPatch::status_only(TaskStatus::Done)),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_mutation_is_followed_by_a_refetch(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    let BoardHarness { store, board, .. } = harness;
    let created = add_tasks(&board, &["One", "Two"]).await?;
    let first = created
        .first()
        .ok_or_else(|| eyre::eyre!("expected created tasks"))?;
    store.clear_requests();

    board
        .edit_task(first.id(), TaskEdit::new("One, renamed"))
        .await?
        .settled()
        .await;
    if let DeleteOutcome::Deleted(committed) = board.delete_task(first.id()).await? {
        committed.settled().await;
    }

    let operations: Vec<_> = store
        .requests()
        .iter()
        .map(StoreRequest::operation)
        .collect();
    assert_eq!(
        operations,
        vec![
            StoreOperation::Update,
            StoreOperation::List,
            StoreOperation::Delete,
            StoreOperation::List,
        ]
    );
    assert_eq!(titles(board.snapshot().tasks()), vec!["Two"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_edits_converge_on_latest_refetch(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    let board = Arc::new(harness.board);
    let created = add_tasks(&board, &["Alpha", "Beta", "Gamma"]).await?;

    let edits: Vec<_> = created
        .into_iter()
        .map(|task| {
            let shared = Arc::clone(&board);
            tokio::spawn(async move {
                let edit = TaskEdit::new(format!("{} edited", task.title()));
                shared.edit_task(task.id(), edit).await
            })
        })
        .collect();

    let mut applied_versions = Vec::new();
    for edit in edits {
        let (_, outcome) = edit.await??.settled().await;
        if let RefetchOutcome::Applied { version } = outcome {
            applied_versions.push(version);
        }
    }

    let snapshot = board.snapshot();
    assert!(!snapshot.is_stale());
    assert_eq!(
        titles(snapshot.tasks()),
        vec!["Alpha edited", "Beta edited", "Gamma edited"]
    );
    assert_eq!(applied_versions.iter().max(), Some(&snapshot.version()));
    Ok(())
}
