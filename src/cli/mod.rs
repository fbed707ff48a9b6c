//! Command-line presentation layer.
//!
//! Each invocation ensures the schema, applies at most one board command,
//! and prints the freshly reloaded board.

mod commands;

pub use commands::{CliError, EXIT_FAILURE, EXIT_STORE_UNAVAILABLE, execute, run};

use crate::task::domain::TaskStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI parser for `taskboard`.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Single-user task board")]
pub struct Cli {
    /// Settings file; `taskboard.toml` in the working directory is used when
    /// present and no path is given.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create the database and task table, applying pending migrations.
    Init,
    /// Add a task.
    Add {
        /// Task description; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        /// Initial column.
        #[arg(long, short, default_value_t = TaskStatus::Todo)]
        status: TaskStatus,
    },
    /// Move a task to another column.
    Move {
        /// Task identifier.
        id: i64,
        /// Destination column: todo, doing, or done.
        status: TaskStatus,
    },
    /// Delete a task permanently.
    Delete {
        /// Task identifier.
        id: i64,
    },
    /// List every task in creation order.
    List {
        /// Print JSON instead of cards.
        #[arg(long)]
        json: bool,
    },
    /// Show the board.
    Board {
        /// Print JSON instead of columns.
        #[arg(long)]
        json: bool,
    },
}
