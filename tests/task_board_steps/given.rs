//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{
    adapters::memory::{StaticConfirmation, StoreOperation},
    domain::{NewTask, TaskPatch, TaskStatus, TaskTitle},
    ports::{TaskStore, TaskStoreError},
};

#[given("an empty task board")]
fn empty_board(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let outcome = run_async(world.board.load());
    eyre::ensure!(outcome.is_applied(), "initial load failed: {outcome:?}");
    Ok(())
}

#[given(r#"a task board with a "{status}" task titled "{title}""#)]
fn board_with_task(
    world: &mut TaskBoardWorld,
    status: String,
    title: String,
) -> Result<(), eyre::Report> {
    let seeded_status = parse_status(&status)?;
    let task_title = TaskTitle::new(title).wrap_err("seed task title")?;
    let created =
        run_async(world.store.create(&NewTask::new(task_title))).wrap_err("seed task")?;
    if seeded_status != TaskStatus::Todo {
        run_async(
            world
                .store
                .update(created.id(), &TaskPatch::status_only(seeded_status)),
        )
        .wrap_err("seed task status")?;
    }

    let outcome = run_async(world.board.load());
    eyre::ensure!(outcome.is_applied(), "initial load failed: {outcome:?}");
    world.store.clear_requests();
    Ok(())
}

#[given("the store will reject the next update")]
fn store_rejects_next_update(world: &mut TaskBoardWorld) {
    world
        .store
        .fail_next(StoreOperation::Update, TaskStoreError::Rejected { status: 500 });
}

#[given("the user will decline confirmations")]
fn user_declines(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    world.replace_confirmation(StaticConfirmation::declining());
    let outcome = run_async(world.board.load());
    eyre::ensure!(outcome.is_applied(), "reload failed: {outcome:?}");
    world.store.clear_requests();
    Ok(())
}
