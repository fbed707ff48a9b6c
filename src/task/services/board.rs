//! Service layer for task board commands.

use super::{BoardError, BoardResult};
use crate::board::BoardState;
use crate::task::{
    domain::{NewTask, Task, TaskDescription, TaskId, TaskStatus},
    ports::{SchemaReport, TaskRepository, TaskSchema},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    description: String,
    status: TaskStatus,
}

impl CreateTaskRequest {
    /// Creates a request for a task in the `todo` column.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: TaskStatus::Todo,
        }
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the raw description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requested initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}

/// Task board orchestration service.
///
/// Validates input, delegates persistence to the repository, and builds
/// board projections from fresh store reads.
pub struct TaskBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] when the description is empty or
    /// too long (nothing is stored), or [`BoardError::Persistence`] when the
    /// store rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        let description = TaskDescription::new(&request.description)?;
        let pending = NewTask::new(description, request.status, &*self.clock);
        let task = self.repository.insert(&pending).await?;
        info!(task_id = %task.id(), status = %task.status(), "created task");
        Ok(task)
    }

    /// Moves a task to another status column.
    ///
    /// Moving a task to the column it is already in succeeds and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when no task has `id`, or
    /// [`BoardError::Persistence`] when the store fails.
    pub async fn move_task(&self, id: TaskId, status: TaskStatus) -> BoardResult<Task> {
        let task = self.repository.update_status(id, status).await?;
        info!(task_id = %id, status = %status, "moved task");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when no task has `id`, or
    /// [`BoardError::Persistence`] when the store fails.
    pub async fn delete(&self, id: TaskId) -> BoardResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Lists every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persistence`] when the store read fails.
    pub async fn list_all(&self) -> BoardResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Rebuilds the board projection from the store's current contents.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persistence`] when the store read fails.
    pub async fn refresh(&self) -> BoardResult<BoardState> {
        let tasks = self.list_all().await?;
        let state = BoardState::from_tasks(tasks);
        debug!(
            todo = state.count(TaskStatus::Todo),
            doing = state.count(TaskStatus::Doing),
            done = state.count(TaskStatus::Done),
            "refreshed board"
        );
        Ok(state)
    }
}

impl<R, C> TaskBoardService<R, C>
where
    R: TaskRepository + TaskSchema,
    C: Clock + Send + Sync,
{
    /// Ensures the store and task table exist, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StoreUnavailable`] when the store cannot be
    /// reached or created, or [`BoardError::Persistence`] when a migration
    /// statement fails.
    pub async fn ensure_schema(&self) -> BoardResult<SchemaReport> {
        let report = self
            .repository
            .ensure_schema()
            .await
            .map_err(BoardError::from)?;
        info!(
            database_created = report.database_created,
            table_created = report.table_created,
            migrations = report.applied_migrations.len(),
            "schema ready"
        );
        Ok(report)
    }
}
