//! Domain model for the task board.
//!
//! A task is a described unit of work sitting in one of three status
//! columns. Infrastructure concerns such as id allocation and persistence
//! stay outside the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskDescription, TaskId};
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
