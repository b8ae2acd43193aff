//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::services::{CreateTaskRequest, DeleteOutcome, DropResult};

#[when(r#"the user adds a task titled "{title}""#)]
fn add_task(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let committed = run_async(world.board.add_task(CreateTaskRequest::new(title)))
        .wrap_err("add task")?;
    run_async(committed.settled());
    Ok(())
}

#[when(r#"the user drags "{title}" onto the "{status}" column"#)]
fn drag_task(world: &mut TaskBoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    let task = world.task_titled(&title)?;

    world.board.begin_drag(&task).wrap_err("begin drag")?;
    // A rejected move is part of the scenario; the board reports it.
    if let Ok(DropResult::Moved(committed)) = run_async(world.board.drop_on(target)) {
        run_async(committed.settled());
    }
    Ok(())
}

#[when(r#"the user deletes "{title}""#)]
fn delete_task(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let outcome = run_async(world.board.delete_task(task.id())).wrap_err("delete task")?;
    if let DeleteOutcome::Deleted(committed) = outcome {
        run_async(committed.settled());
    }
    Ok(())
}
