//! Service-level error taxonomy surfaced to presentation layers.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::{SchemaError, TaskRepositoryError},
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Coarse failure category presentation layers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    /// The backing store cannot be reached or created.
    StoreUnavailable,
    /// Caller-supplied data violates a field constraint.
    Validation,
    /// The referenced task does not exist.
    NotFound,
    /// The store failed mid-operation; nothing was applied.
    Persistence,
}

impl BoardErrorKind {
    /// Returns a stable name for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StoreUnavailable => "StoreUnavailable",
            Self::Validation => "ValidationError",
            Self::NotFound => "NotFound",
            Self::Persistence => "PersistenceError",
        }
    }
}

impl fmt::Display for BoardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by board service operations.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// The backing store cannot be reached or created.
    #[error("store unavailable: {0}")]
    StoreUnavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Domain validation failed; the operation was not attempted.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store rejected or failed the operation and rolled it back.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::StoreUnavailable(_) => BoardErrorKind::StoreUnavailable,
            Self::Validation(_) => BoardErrorKind::Validation,
            Self::NotFound(_) => BoardErrorKind::NotFound,
            Self::Persistence(_) => BoardErrorKind::Persistence,
        }
    }

    /// Returns `true` when the process should stop instead of presenting a
    /// board.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), BoardErrorKind::StoreUnavailable)
    }
}

impl From<TaskRepositoryError> for BoardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Persistence(cause) => Self::Persistence(cause),
        }
    }
}

impl From<SchemaError> for BoardError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::StoreUnavailable(cause) => Self::StoreUnavailable(cause),
            SchemaError::Persistence(cause) => Self::Persistence(cause),
            shape @ SchemaError::UnrecognisedShape(_) => Self::Persistence(Arc::new(shape)),
        }
    }
}
