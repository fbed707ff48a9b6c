//! Port contracts for the task store.
//!
//! Ports define infrastructure-agnostic interfaces used by the board
//! services.

pub mod repository;
pub mod schema;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use schema::{SchemaError, SchemaMigration, SchemaReport, SchemaResult, TaskSchema};
