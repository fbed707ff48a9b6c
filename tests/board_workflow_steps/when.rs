//! When steps for task board workflow scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use rstest_bdd_macros::when;
use taskboard::board::BoardCommand;
use taskboard::task::{domain::TaskId, services::CreateTaskRequest};

fn apply(world: &mut BoardWorld, command: BoardCommand) -> Result<(), eyre::Report> {
    let board = world.board_mut()?;
    let result = run_async(board.apply(command));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user adds "{description}" to "{status}""#)]
fn add_task(world: &mut BoardWorld, description: String, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    apply(
        world,
        BoardCommand::Create(CreateTaskRequest::new(description).with_status(target)),
    )
}

#[when("the user adds a task with a blank description")]
fn add_blank_task(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    apply(world, BoardCommand::Create(CreateTaskRequest::new("   ")))
}

#[when(r#"the user moves "{description}" to "{status}""#)]
fn move_task(world: &mut BoardWorld, description: String, status: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&description)?;
    let target = parse_status(&status)?;
    apply(world, BoardCommand::Move { id, status: target })
}

#[when(r#"the user moves task #{id:i64} to "{status}""#)]
fn move_task_by_id(world: &mut BoardWorld, id: i64, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    apply(
        world,
        BoardCommand::Move {
            id: TaskId::new(id),
            status: target,
        },
    )
}

#[when(r#"the user deletes "{description}""#)]
fn delete_task(world: &mut BoardWorld, description: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&description)?;
    apply(world, BoardCommand::Delete(id))
}
