//! Stateful board handle that reloads from the store after every command.

use super::BoardState;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{BoardResult, CreateTaskRequest, TaskBoardService},
};
use mockable::Clock;

/// A user intent issued against the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Add a task.
    Create(CreateTaskRequest),
    /// Move a task to another column, e.g. after a drag and drop.
    Move {
        /// Task being moved.
        id: TaskId,
        /// Destination column.
        status: TaskStatus,
    },
    /// Permanently remove a task.
    Delete(TaskId),
    /// Reload the board without changing anything.
    Refresh,
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A task was created.
    Created(Task),
    /// A task was moved.
    Moved {
        /// The task as stored after the move.
        task: Task,
        /// Column the task occupied in the state loaded before the move, or
        /// `None` when that state did not show it.
        from: Option<TaskStatus>,
    },
    /// A task was deleted.
    Deleted(TaskId),
    /// The board was reloaded.
    Refreshed,
}

/// Board handle held by a presentation layer.
///
/// The handle owns the service and the latest [`BoardState`]; the state is
/// replaced wholesale after each successful command.
pub struct Board<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskBoardService<R, C>,
    state: BoardState,
}

impl<R, C> Board<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Opens a board and loads its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::services::BoardError`] when the initial load
    /// fails.
    pub async fn open(service: TaskBoardService<R, C>) -> BoardResult<Self> {
        let state = service.refresh().await?;
        Ok(Self { service, state })
    }

    /// Returns the most recently loaded state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Applies a command and reloads the board from the store.
    ///
    /// A command that fails leaves the store and the current state as they
    /// were. When the command succeeds but the reload fails, the change is
    /// already stored while the current state still shows the previous load;
    /// a later [`BoardCommand::Refresh`] brings it back in line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::services::BoardError`] when the command or
    /// the reload fails.
    pub async fn apply(&mut self, command: BoardCommand) -> BoardResult<CommandOutcome> {
        let outcome = match command {
            BoardCommand::Create(request) => {
                CommandOutcome::Created(self.service.create(request).await?)
            }
            BoardCommand::Move { id, status } => {
                let from = self.state.find(id).map(Task::status);
                let task = self.service.move_task(id, status).await?;
                CommandOutcome::Moved { task, from }
            }
            BoardCommand::Delete(id) => {
                self.service.delete(id).await?;
                CommandOutcome::Deleted(id)
            }
            BoardCommand::Refresh => CommandOutcome::Refreshed,
        };
        self.state = self.service.refresh().await?;
        Ok(outcome)
    }
}
