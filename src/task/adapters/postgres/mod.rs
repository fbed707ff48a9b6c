//! `PostgreSQL` adapters for the task store.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{LEGACY_DONE_FLAG_TO_STATUS, MIGRATIONS};
pub use repository::{PostgresTaskRepository, TaskPgPool};
