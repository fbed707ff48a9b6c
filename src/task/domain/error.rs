//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The description exceeds the persisted column width.
    #[error("task description is {length} characters long, the maximum is {max}")]
    DescriptionTooLong {
        /// Character count of the trimmed description.
        length: usize,
        /// Largest accepted character count.
        max: usize,
    },
}

/// Error returned while parsing task statuses from persistence or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
