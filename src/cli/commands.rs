//! Command dispatch and output for the CLI.

use super::Command;
use crate::board::{Board, BoardCommand, CommandOutcome, render_board, render_card};
use crate::config::StoreSettings;
use crate::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::TaskId,
    ports::{SchemaReport, TaskRepository, TaskSchema},
    services::{BoardError, CreateTaskRequest, TaskBoardService},
};
use mockable::{Clock, DefaultClock};
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Process exit code used when the store cannot be reached.
pub const EXIT_STORE_UNAVAILABLE: u8 = 2;

/// Process exit code used for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced by a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// A board operation failed.
    #[error("{kind}: {0}", kind = .0.kind())]
    Board(#[from] BoardError),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing JSON output failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Board(err) if err.is_fatal() => EXIT_STORE_UNAVAILABLE,
            _ => EXIT_FAILURE,
        }
    }
}

enum Action {
    Init,
    List { json: bool },
    Board { command: BoardCommand, json: bool },
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Init => Self::Init,
            Command::List { json } => Self::List { json },
            Command::Board { json } => Self::Board {
                command: BoardCommand::Refresh,
                json,
            },
            Command::Add {
                description,
                status,
            } => Self::Board {
                command: BoardCommand::Create(
                    CreateTaskRequest::new(description.join(" ")).with_status(status),
                ),
                json: false,
            },
            Command::Move { id, status } => Self::Board {
                command: BoardCommand::Move {
                    id: TaskId::new(id),
                    status,
                },
                json: false,
            },
            Command::Delete { id } => Self::Board {
                command: BoardCommand::Delete(TaskId::new(id)),
                json: false,
            },
        }
    }
}

/// Runs `command` against the `PostgreSQL` store described by `store`.
///
/// # Errors
///
/// Returns [`CliError`] when the schema cannot be ensured, the command
/// fails, or output cannot be written.
pub async fn run(command: Command, store: &StoreSettings, out: &mut impl Write) -> Result<(), CliError> {
    let repository = Arc::new(PostgresTaskRepository::from_settings(store));
    let service = TaskBoardService::new(repository, Arc::new(DefaultClock));
    execute(command, service, out).await
}

/// Runs `command` against an already constructed service.
///
/// The schema is ensured first, so a store that cannot be reached fails
/// before any board is shown.
///
/// # Errors
///
/// Returns [`CliError`] when the schema cannot be ensured, the command
/// fails, or output cannot be written.
pub async fn execute<R, C>(
    command: Command,
    service: TaskBoardService<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: TaskRepository + TaskSchema,
    C: Clock + Send + Sync,
{
    let report = service.ensure_schema().await?;
    match Action::from(command) {
        Action::Init => write_report(&report, out)?,
        Action::List { json } => {
            let tasks = service.list_all().await?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &tasks)?;
                writeln!(out)?;
            } else {
                for task in &tasks {
                    writeln!(out, "{}", render_card(task))?;
                }
            }
        }
        Action::Board { command, json } => {
            let mut board = Board::open(service).await?;
            let outcome = board.apply(command).await?;
            write_outcome(&outcome, out)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, board.state())?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render_board(board.state()))?;
            }
        }
    }
    Ok(())
}

fn write_report(report: &SchemaReport, out: &mut impl Write) -> std::io::Result<()> {
    if report.is_noop() {
        return writeln!(out, "schema up to date");
    }
    if report.database_created {
        writeln!(out, "created database")?;
    }
    if report.table_created {
        writeln!(out, "created task table")?;
    }
    for migration in &report.applied_migrations {
        writeln!(out, "applied migration {migration}")?;
    }
    Ok(())
}

fn write_outcome(outcome: &CommandOutcome, out: &mut impl Write) -> std::io::Result<()> {
    match outcome {
        CommandOutcome::Created(task) => writeln!(out, "created {}", render_card(task)),
        CommandOutcome::Moved { task, from } => match from {
            Some(from) if *from != task.status() => writeln!(
                out,
                "moved from {} to {}: {}",
                from.label(),
                task.status().label(),
                render_card(task)
            ),
            _ => writeln!(out, "moved {}", render_card(task)),
        },
        CommandOutcome::Deleted(id) => writeln!(out, "deleted task #{id}"),
        CommandOutcome::Refreshed => Ok(()),
    }
}
