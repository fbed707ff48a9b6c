//! Startup schema tests: database creation, table creation, and the legacy
//! done-flag migration.

use super::helpers::{
    BoxError, FreshStore, LEGACY_TABLE_SQL, PostgresCluster, postgres_cluster,
};
use crate::clock::SteppingClock;
use rstest::rstest;
use std::net::TcpListener;
use taskboard::config::StoreSettings;
use taskboard::task::{
    adapters::postgres::{LEGACY_DONE_FLAG_TO_STATUS, PostgresTaskRepository},
    domain::{TaskId, TaskStatus},
    ports::{SchemaError, TaskSchema},
    services::{BoardErrorKind, CreateTaskRequest},
};

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn first_start_creates_database_and_table(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = FreshStore::new(postgres_cluster);

    let report = store.repository.ensure_schema().await?;

    assert!(report.database_created);
    assert!(report.table_created);
    assert!(report.applied_migrations.is_empty());
    assert_eq!(
        store.task_columns()?,
        ["id", "description", "status", "created_at"]
    );
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_start_changes_nothing(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = FreshStore::new(postgres_cluster);
    store.repository.ensure_schema().await?;
    let service = store.service(SteppingClock::per_minute());
    let created = service.create(CreateTaskRequest::new("Survives restart")).await?;

    let report = store.repository.ensure_schema().await?;

    assert!(report.is_noop());
    assert_eq!(service.list_all().await?, vec![created]);
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_done_flag_becomes_status(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = FreshStore::new(postgres_cluster);
    store.create_empty_database()?;
    store.execute(LEGACY_TABLE_SQL)?;
    store.execute(concat!(
        "INSERT INTO tasks (description, done, created_at) VALUES ",
        "('finished', TRUE, '2024-03-01T10:00:00Z'), ",
        "('pending', FALSE, '2024-03-01T11:00:00Z'), ",
        "('unknown', NULL, '2024-03-01T12:00:00Z')",
    ))?;

    let report = store.repository.ensure_schema().await?;

    assert!(!report.database_created);
    assert!(!report.table_created);
    assert_eq!(report.applied_migrations, [LEGACY_DONE_FLAG_TO_STATUS]);
    assert!(!store.task_columns()?.iter().any(|column| column == "done"));

    let service = store.service(SteppingClock::per_minute());
    let migrated: Vec<(TaskId, String, TaskStatus)> = service
        .list_all()
        .await?
        .into_iter()
        .map(|task| {
            (
                task.id(),
                task.description().as_str().to_owned(),
                task.status(),
            )
        })
        .collect();
    assert_eq!(
        migrated,
        [
            (TaskId::new(1), "finished".to_owned(), TaskStatus::Done),
            (TaskId::new(2), "pending".to_owned(), TaskStatus::Todo),
            (TaskId::new(3), "unknown".to_owned(), TaskStatus::Todo),
        ]
    );

    let added = service
        .create(CreateTaskRequest::new("after migration").with_status(TaskStatus::Doing))
        .await?;
    assert_eq!(added.id(), TaskId::new(4));
    assert!(store.repository.ensure_schema().await?.is_noop());
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn unrecognised_table_shape_is_reported(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = FreshStore::new(postgres_cluster);
    store.create_empty_database()?;
    store.execute("CREATE TABLE tasks (id SERIAL PRIMARY KEY, description TEXT NOT NULL)")?;

    let result = store.repository.ensure_schema().await;

    assert!(matches!(result, Err(SchemaError::UnrecognisedShape(_))));
    let service = store.service(SteppingClock::per_minute());
    let board_error = service.ensure_schema().await.map(|_| ()).map_err(|err| err.kind());
    assert_eq!(board_error, Err(BoardErrorKind::Persistence));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_store_unavailable() -> Result<(), BoxError> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    drop(listener);
    let settings = StoreSettings {
        host: "127.0.0.1".to_owned(),
        port,
        username: "postgres".to_owned(),
        password: String::new().into(),
        database: "todo_db".to_owned(),
        pool_size: 1,
        connect_timeout_secs: 1,
    };
    let repository = PostgresTaskRepository::from_settings(&settings);

    let result = repository.ensure_schema().await;

    assert!(matches!(result, Err(SchemaError::StoreUnavailable(_))));
    Ok(())
}
