//! In-memory task repository for tests and throwaway boards.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{
        SchemaReport, SchemaResult, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        TaskSchema,
    },
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are allocated from a counter starting at 1 and are never
/// reused, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next_id = state.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task id space exhausted"))
        })?;
        state.last_id = next_id;

        let stored = task.clone().into_task(TaskId::new(next_id));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.move_to(status);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(drop)
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(Task::ordering_key);
        Ok(tasks)
    }
}

#[async_trait]
impl TaskSchema for InMemoryTaskRepository {
    async fn ensure_schema(&self) -> SchemaResult<SchemaReport> {
        Ok(SchemaReport::default())
    }
}
