//! Logging setup for the command-line entry point.

use crate::config::TelemetrySettings;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter '{directive}': {source}")]
    Filter {
        /// Directive taken from settings.
        directive: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured level when it is set and valid.
/// Output goes to stderr so stdout stays free for rendered boards.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the configured directive is invalid or a
/// subscriber was already installed.
pub fn init_tracing(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .map_err(|source| TelemetryError::Filter {
            directive: settings.log_level.clone(),
            source,
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(TelemetryError::Install)
}
