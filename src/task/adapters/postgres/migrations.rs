//! Startup schema management for the `PostgreSQL` task store.
//!
//! The task table is created when absent. Tables created before the status
//! column existed carry a boolean `done` flag instead; those are upgraded in
//! place by a versioned migration step guarded by a column probe, so the step
//! runs at most once per database.

use crate::task::ports::{SchemaError, SchemaMigration, SchemaReport, SchemaResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

/// Replaces the legacy boolean `done` flag with the tri-state `status`
/// column.
pub const LEGACY_DONE_FLAG_TO_STATUS: SchemaMigration = SchemaMigration {
    version: 1,
    name: "legacy_done_flag_to_status",
};

/// Every migration step in application order.
pub const MIGRATIONS: &[SchemaMigration] = &[LEGACY_DONE_FLAG_TO_STATUS];

const TASKS_TABLE: &str = "tasks";
const STATUS_COLUMN: &str = "status";
const LEGACY_DONE_COLUMN: &str = "done";

const CREATE_TASKS_TABLE_SQL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id BIGSERIAL PRIMARY KEY, ",
    "description VARCHAR(1024) NOT NULL, ",
    "status VARCHAR(20) NOT NULL DEFAULT 'todo', ",
    "created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), ",
    "CONSTRAINT tasks_status_known CHECK (status IN ('todo', 'doing', 'done'))",
    ")",
);

const MIGRATE_LEGACY_DONE_FLAG_SQL: &str = concat!(
    "ALTER TABLE tasks ALTER COLUMN id TYPE BIGINT; ",
    "ALTER TABLE tasks ADD COLUMN status VARCHAR(20) NOT NULL DEFAULT 'todo'; ",
    "UPDATE tasks SET status = CASE WHEN COALESCE(done::int, 0) <> 0 ",
    "THEN 'done' ELSE 'todo' END; ",
    "ALTER TABLE tasks ADD CONSTRAINT tasks_status_known ",
    "CHECK (status IN ('todo', 'doing', 'done')); ",
    "ALTER TABLE tasks DROP COLUMN done;",
);

const CREATE_ORDERING_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at_id ON tasks (created_at, id)";

/// Target database and the maintenance connection used to create it.
#[derive(Debug, Clone)]
pub(super) struct DatabaseBootstrap {
    pub(super) maintenance_conninfo: SecretString,
    pub(super) database: String,
}

#[derive(Debug, Error)]
enum MigrationFailure {
    #[error(transparent)]
    Query(#[from] DieselError),
    #[error("{0}")]
    Shape(String),
}

impl From<MigrationFailure> for SchemaError {
    fn from(failure: MigrationFailure) -> Self {
        match failure {
            MigrationFailure::Query(err) => Self::persistence(err),
            MigrationFailure::Shape(detail) => Self::UnrecognisedShape(detail),
        }
    }
}

#[derive(QueryableByName)]
struct PresenceRow {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct ColumnNameRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    column_name: String,
}

/// Creates the board database when the server does not have it yet.
///
/// Returns `true` when the database was created by this call.
pub(super) fn ensure_database(target: &DatabaseBootstrap) -> SchemaResult<bool> {
    let mut admin = PgConnection::establish(target.maintenance_conninfo.expose_secret())
        .map_err(SchemaError::unavailable)?;

    let existing = diesel::sql_query(
        "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS present",
    )
    .bind::<diesel::sql_types::Text, _>(target.database.as_str())
    .get_result::<PresenceRow>(&mut admin)
    .map_err(SchemaError::unavailable)?;
    if existing.present {
        debug!(database = %target.database, "task board database already exists");
        return Ok(false);
    }

    let create = format!("CREATE DATABASE {}", quote_identifier(&target.database));
    diesel::sql_query(create)
        .execute(&mut admin)
        .map_err(SchemaError::unavailable)?;
    info!(database = %target.database, "created task board database");
    Ok(true)
}

/// Brings the task table to its current shape inside one transaction.
pub(super) fn apply_migrations(connection: &mut PgConnection) -> SchemaResult<SchemaReport> {
    let report = connection.transaction::<_, MigrationFailure, _>(|tx| {
        let table_created = !table_exists(tx)?;
        tx.batch_execute(CREATE_TASKS_TABLE_SQL)?;
        if table_created {
            info!(table = TASKS_TABLE, "created task table");
        }

        let columns = table_columns(tx)?;
        let mut applied_migrations = Vec::new();
        if columns.contains(STATUS_COLUMN) {
            debug!(
                migration = %LEGACY_DONE_FLAG_TO_STATUS,
                "status column present, skipping legacy migration"
            );
        } else if columns.contains(LEGACY_DONE_COLUMN) {
            tx.batch_execute(MIGRATE_LEGACY_DONE_FLAG_SQL)?;
            info!(
                migration = %LEGACY_DONE_FLAG_TO_STATUS,
                "migrated legacy done flag to status column"
            );
            applied_migrations.push(LEGACY_DONE_FLAG_TO_STATUS);
        } else {
            return Err(MigrationFailure::Shape(format!(
                "neither '{STATUS_COLUMN}' nor '{LEGACY_DONE_COLUMN}' column present"
            )));
        }

        tx.batch_execute(CREATE_ORDERING_INDEX_SQL)?;
        Ok(SchemaReport {
            database_created: false,
            table_created,
            applied_migrations,
        })
    })?;
    Ok(report)
}

fn table_exists(connection: &mut PgConnection) -> Result<bool, DieselError> {
    let row = diesel::sql_query(concat!(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables ",
        "WHERE table_schema = current_schema() AND table_name = $1) AS present",
    ))
    .bind::<diesel::sql_types::Text, _>(TASKS_TABLE)
    .get_result::<PresenceRow>(connection)?;
    Ok(row.present)
}

fn table_columns(connection: &mut PgConnection) -> Result<BTreeSet<String>, DieselError> {
    let rows = diesel::sql_query(concat!(
        "SELECT column_name::text AS column_name FROM information_schema.columns ",
        "WHERE table_schema = current_schema() AND table_name = $1",
    ))
    .bind::<diesel::sql_types::Text, _>(TASKS_TABLE)
    .load::<ColumnNameRow>(connection)?;
    Ok(rows.into_iter().map(|row| row.column_name).collect())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
