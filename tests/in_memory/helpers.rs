//! Shared test helpers for in-memory task board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskStore, RecordingNotifier, StaticConfirmation},
    domain::Task,
    services::{CreateTaskRequest, TaskBoard},
};

/// Store type shared by the integration tests.
pub type TestStore = InMemoryTaskStore<DefaultClock>;

/// Board type shared by the integration tests.
pub type TestBoard = TaskBoard<TestStore, RecordingNotifier, StaticConfirmation>;

/// A board together with the collaborators tests inspect.
pub struct BoardHarness {
    pub store: TestStore,
    pub notifier: RecordingNotifier,
    pub board: TestBoard,
}

/// Provides a loaded, empty board whose confirmations are accepted.
#[fixture]
pub fn harness() -> BoardHarness {
    let store = InMemoryTaskStore::new();
    let notifier = RecordingNotifier::new();
    let board = TaskBoard::new(
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
        Arc::new(StaticConfirmation::accepting()),
    );
    BoardHarness {
        store,
        notifier,
        board,
    }
}

/// Adds tasks with the given titles and waits for each refetch.
///
/// # Errors
///
/// Returns an error if any create fails.
pub async fn add_tasks(board: &TestBoard, titles: &[&str]) -> Result<Vec<Task>, eyre::Report> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        let (task, _) = board
            .add_task(CreateTaskRequest::new(*title))
            .await?
            .settled()
            .await;
        created.push(task);
    }
    Ok(created)
}

/// Returns the titles of `tasks` in order.
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}
