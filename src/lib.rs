//! Taskboard: a single-user task board backed by `PostgreSQL`.
//!
//! Tasks carry a description, a status column (`todo`, `doing`, `done`) and
//! a creation timestamp. The store is the single source of truth; the board
//! is rebuilt from a full reload after every command.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task types and validation rules
//! - **Ports**: Repository and schema traits
//! - **Adapters**: In-memory and `PostgreSQL` stores
//!
//! # Modules
//!
//! - [`task`]: Task domain, ports, adapters, and the board service
//! - [`board`]: Column projection, the board handle, and text rendering
//! - [`config`]: Layered settings
//! - [`telemetry`]: Logging setup
//! - [`cli`]: Command-line presentation

pub mod board;
pub mod cli;
pub mod config;
pub mod task;
pub mod telemetry;
