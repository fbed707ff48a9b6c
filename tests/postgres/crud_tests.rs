//! CRUD and listing tests against a migrated database.

use super::helpers::{BoxError, PostgresCluster, migrated_store, postgres_cluster};
use crate::clock::SteppingClock;
use rstest::rstest;
use taskboard::task::{
    domain::{TaskId, TaskStatus},
    services::{BoardError, BoardErrorKind, CreateTaskRequest},
};

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());

    let created = service
        .create(CreateTaskRequest::new("  Buy milk ").with_status(TaskStatus::Doing))
        .await?;

    assert_eq!(created.id(), TaskId::new(1));
    assert_eq!(created.description().as_str(), "Buy milk");
    assert_eq!(service.list_all().await?, vec![created]);
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn move_and_delete_persist(postgres_cluster: PostgresCluster) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());
    let kept = service.create(CreateTaskRequest::new("Keep")).await?;
    let dropped = service.create(CreateTaskRequest::new("Drop")).await?;

    let moved = service.move_task(kept.id(), TaskStatus::Done).await?;
    service.delete(dropped.id()).await?;

    assert_eq!(moved.created_at(), kept.created_at());
    let state = service.refresh().await?;
    assert_eq!(state.column(TaskStatus::Done), [moved]);
    assert_eq!(state.total(), 1);
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_identifier_is_not_found(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());
    let missing = TaskId::new(404);

    let moved = service.move_task(missing, TaskStatus::Doing).await;
    let deleted = service.delete(missing).await;

    assert!(matches!(moved, Err(BoardError::NotFound(id)) if id == missing));
    assert!(matches!(deleted, Err(BoardError::NotFound(id)) if id == missing));
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn listing_orders_by_creation_then_identifier(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let frozen = store.service(SteppingClock::frozen());
    for description in ["tie-one", "tie-two"] {
        frozen.create(CreateTaskRequest::new(description)).await?;
    }
    store.execute("UPDATE tasks SET created_at = created_at + INTERVAL '1 hour' WHERE id = 1")?;

    let listed: Vec<String> = frozen
        .list_all()
        .await?
        .into_iter()
        .map(|task| task.description().as_str().to_owned())
        .collect();

    assert_eq!(listed, ["tie-two", "tie-one"]);
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn over_long_description_is_rejected_before_storage(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());

    let result = service.create(CreateTaskRequest::new("x".repeat(1025))).await;

    assert_eq!(
        result.map(|_| ()).map_err(|err| err.kind()),
        Err(BoardErrorKind::Validation)
    );
    assert!(service.list_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn rows_with_unknown_status_are_left_off_the_board(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());
    let kept = service.create(CreateTaskRequest::new("Visible")).await?;
    service.create(CreateTaskRequest::new("Corrupted")).await?;
    store.execute(concat!(
        "ALTER TABLE tasks DROP CONSTRAINT tasks_status_known; ",
        "UPDATE tasks SET status = 'archived' WHERE id = 2;",
    ))?;

    let state = service.refresh().await?;

    assert_eq!(state.total(), 1);
    assert_eq!(state.find(kept.id()), Some(&kept));
    Ok(())
}

#[rstest]
#[case("TODO")]
#[case(" done ")]
#[case("to-do")]
#[ignore = "requires an embedded PostgreSQL server; run with --ignored"]
#[tokio::test(flavor = "multi_thread")]
async fn rows_with_non_canonical_status_are_left_off_the_board(
    postgres_cluster: PostgresCluster,
    #[case] stored: &str,
) -> Result<(), BoxError> {
    let store = migrated_store(postgres_cluster).await?;
    let service = store.service(SteppingClock::per_minute());
    let kept = service.create(CreateTaskRequest::new("Visible")).await?;
    service.create(CreateTaskRequest::new("Miscased")).await?;
    store.execute(&format!(
        "ALTER TABLE tasks DROP CONSTRAINT tasks_status_known; \
         UPDATE tasks SET status = '{stored}' WHERE id = 2;"
    ))?;

    let state = service.refresh().await?;

    assert_eq!(state.total(), 1);
    assert_eq!(state.find(kept.id()), Some(&kept));
    Ok(())
}
