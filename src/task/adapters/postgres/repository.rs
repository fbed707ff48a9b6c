//! `PostgreSQL` repository implementation for the task store.

use super::{
    migrations::{DatabaseBootstrap, apply_migrations, ensure_database},
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::config::StoreSettings;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskDescription, TaskId, TaskStatus},
    ports::{
        SchemaError, SchemaReport, SchemaResult, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, TaskSchema,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, warn};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const MIN_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// `PostgreSQL`-backed task repository.
///
/// Each operation checks a connection out of the pool, runs inside its own
/// transaction, and returns the connection before completing.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
    bootstrap: Option<DatabaseBootstrap>,
}

impl PostgresTaskRepository {
    /// Creates a repository over an existing pool.
    ///
    /// [`TaskSchema::ensure_schema`] on such a repository assumes the
    /// database already exists and only manages the task table.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self {
            pool,
            bootstrap: None,
        }
    }

    /// Creates a repository from connection settings.
    ///
    /// No connection is opened here; the pool connects lazily. Calling
    /// [`TaskSchema::ensure_schema`] creates the configured database when it
    /// is missing.
    #[must_use]
    pub fn from_settings(settings: &StoreSettings) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(settings.conninfo().expose_secret());
        let pool = Pool::builder()
            .max_size(settings.pool_size.max(1))
            .min_idle(Some(0))
            .connection_timeout(settings.connect_timeout().max(MIN_CONNECT_TIMEOUT))
            .build_unchecked(manager);

        Self {
            pool,
            bootstrap: Some(DatabaseBootstrap {
                maintenance_conninfo: settings.maintenance_conninfo(),
                database: settings.database.clone(),
            }),
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let pending = task.clone();
        self.run_blocking(move |connection| {
            let new_row = NewTaskRow {
                description: pending.description().as_str(),
                status: pending.status().as_str(),
                created_at: pending.created_at(),
            };
            let row = connection
                .transaction(|tx| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)
                })
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = connection
                .transaction(|tx| {
                    diesel::update(tasks::table.find(id.value()))
                        .set(tasks::status.eq(status.as_str()))
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)
                        .optional()
                })
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = connection
                .transaction(|tx| diesel::delete(tasks::table.find(id.value())).execute(tx))
                .map_err(TaskRepositoryError::persistence)?;
            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            debug!(rows = rows.len(), "loaded task rows");
            Ok(rows.into_iter().filter_map(decode_listed_row).collect())
        })
        .await
    }
}

#[async_trait]
impl TaskSchema for PostgresTaskRepository {
    async fn ensure_schema(&self) -> SchemaResult<SchemaReport> {
        let pool = self.pool.clone();
        let bootstrap = self.bootstrap.clone();
        tokio::task::spawn_blocking(move || {
            let database_created = match bootstrap {
                Some(target) => ensure_database(&target)?,
                None => false,
            };
            let mut connection = pool.get().map_err(SchemaError::unavailable)?;
            let report = apply_migrations(&mut connection)?;
            Ok(SchemaReport {
                database_created,
                ..report
            })
        })
        .await
        .map_err(SchemaError::persistence)?
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        description: persisted_description,
        status: persisted_status,
        created_at,
    } = row;

    let description = TaskDescription::new(&persisted_description)
        .map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::from_stored(&persisted_status).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        description,
        status,
        created_at,
    }))
}

/// Decodes a listed row, dropping rows that no longer satisfy the domain
/// rules instead of failing the whole listing.
fn decode_listed_row(row: TaskRow) -> Option<Task> {
    let id = row.id;
    match row_to_task(row) {
        Ok(task) => Some(task),
        Err(err) => {
            warn!(task_id = id, error = %err, "dropping undecodable task row");
            None
        }
    }
}
