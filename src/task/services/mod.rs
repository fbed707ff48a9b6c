//! Application services for the task board.

mod board;
mod error;

pub use board::{CreateTaskRequest, TaskBoardService};
pub use error::{BoardError, BoardErrorKind, BoardResult};
