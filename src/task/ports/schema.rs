//! Schema port: startup guarantees about the backing store's shape.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Startup contract for stores that own a schema.
#[async_trait]
pub trait TaskSchema: Send + Sync {
    /// Ensures the backing store exists and the task table has its current
    /// shape, applying pending migrations.
    ///
    /// Repeated calls after a successful run change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::StoreUnavailable`] when the store cannot be
    /// reached or created, and [`SchemaError::Persistence`] when a probe or
    /// migration statement fails.
    async fn ensure_schema(&self) -> SchemaResult<SchemaReport>;
}

/// Identifies a versioned schema migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaMigration {
    /// Monotonic step version.
    pub version: u32,
    /// Short descriptive name.
    pub name: &'static str,
}

impl fmt::Display for SchemaMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}_{}", self.version, self.name)
    }
}

/// Summary of the work performed by [`TaskSchema::ensure_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Whether the backing database had to be created.
    pub database_created: bool,
    /// Whether the task table had to be created.
    pub table_created: bool,
    /// Migration steps applied during this run, in order.
    pub applied_migrations: Vec<SchemaMigration>,
}

impl SchemaReport {
    /// Returns `true` when the run changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.database_created && !self.table_created && self.applied_migrations.is_empty()
    }
}

/// Errors returned while ensuring the schema.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// The store could not be reached or created.
    #[error("store unavailable: {0}")]
    StoreUnavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The task table exists but matches neither the current nor the legacy
    /// shape.
    #[error("tasks table has an unrecognised shape: {0}")]
    UnrecognisedShape(String),

    /// A probe or migration statement failed.
    #[error("schema persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SchemaError {
    /// Wraps a connectivity failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StoreUnavailable(Arc::new(err))
    }

    /// Wraps a statement failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
