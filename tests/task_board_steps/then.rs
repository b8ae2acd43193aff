//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status};
use rstest_bdd_macros::then;
use taskboard::task::adapters::memory::StoreOperation;

fn column_titles(world: &TaskBoardWorld, status: &str) -> Result<Vec<String>, eyre::Report> {
    let column = parse_status(status)?;
    Ok(world
        .board
        .view()
        .projection
        .column(column)
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

#[then(r#"the "{status}" column lists "{title}""#)]
fn column_lists(world: &TaskBoardWorld, status: String, title: String) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &status)?;
    eyre::ensure!(
        titles.contains(&title),
        "expected {title:?} in the {status} column, found {titles:?}"
    );
    Ok(())
}

#[then(r#"the "{status}" column is empty"#)]
fn column_is_empty(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let titles = column_titles(world, &status)?;
    eyre::ensure!(
        titles.is_empty(),
        "expected the {status} column to be empty, found {titles:?}"
    );
    Ok(())
}

fn ensure_total(world: &TaskBoardWorld, expected: usize) -> Result<(), eyre::Report> {
    let total = world.board.view().counts.total;
    eyre::ensure!(total == expected, "expected {expected} tasks, found {total}");
    Ok(())
}

#[then("the board shows {count:usize} task in total")]
fn board_shows_one_task(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    ensure_total(world, count)
}

#[then("the board shows {count:usize} tasks in total")]
fn board_shows_tasks(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    ensure_total(world, count)
}

fn ensure_requests(
    world: &TaskBoardWorld,
    operation: StoreOperation,
    expected: usize,
) -> Result<(), eyre::Report> {
    let received = world.store.request_count(operation);
    eyre::ensure!(
        received == expected,
        "expected {expected} {operation:?} requests, store received {received}"
    );
    Ok(())
}

#[then("the store received {count:usize} update request")]
fn one_update_request(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    ensure_requests(world, StoreOperation::Update, count)
}

#[then("the store received {count:usize} update requests")]
fn update_requests(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    ensure_requests(world, StoreOperation::Update, count)
}

#[then("the store received {count:usize} delete requests")]
fn delete_requests(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    ensure_requests(world, StoreOperation::Delete, count)
}

#[then(r#"the last notification is "{message}""#)]
fn last_notification(world: &TaskBoardWorld, message: String) -> Result<(), eyre::Report> {
    let last = world
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("no notification was shown"))?;
    eyre::ensure!(
        last.message == message,
        "expected notification {message:?}, got {:?} ({})",
        last.message,
        last.kind
    );
    Ok(())
}
