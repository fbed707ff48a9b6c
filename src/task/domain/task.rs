//! Task aggregate and status types.

use super::{ParseTaskStatusError, TaskDescription, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Board column a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is in progress.
    Doing,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns the column heading shown for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "TO-DO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }

    /// Parses a persisted status value.
    ///
    /// Only the exact storage names are accepted; the case folding and
    /// aliases allowed for user input are rejected here.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] for any other value.
    pub fn from_stored(value: &str) -> Result<Self, ParseTaskStatusError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated task that has not been persisted yet.
///
/// The store assigns the identifier when the task is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    description: TaskDescription,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a pending task stamped with the current clock time.
    #[must_use]
    pub fn new(description: TaskDescription, status: TaskStatus, clock: &impl Clock) -> Self {
        Self {
            description,
            status,
            created_at: clock.utc(),
        }
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches a store-assigned identifier, producing the persisted task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    description: TaskDescription,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the task to `status`.
    ///
    /// Returns `false` when the task was already in that status, in which
    /// case nothing changes.
    pub fn move_to(&mut self, status: TaskStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Key that orders tasks within and across columns.
    #[must_use]
    pub const fn ordering_key(&self) -> (DateTime<Utc>, TaskId) {
        (self.created_at, self.id)
    }
}
