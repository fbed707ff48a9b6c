//! `taskboard` command-line entry point.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use taskboard::cli::{Cli, EXIT_FAILURE, run};
use taskboard::config::Settings;
use taskboard::telemetry::init_tracing;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { config, command } = Cli::parse();

    let settings = match Settings::load(config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => return report_failure(&format!("ConfigError: {err}"), EXIT_FAILURE),
    };
    if let Err(err) = init_tracing(&settings.telemetry) {
        return report_failure(&format!("ConfigError: {err}"), EXIT_FAILURE);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(command, &settings.store, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            report_failure(&err.to_string(), err.exit_code())
        }
    }
}

fn report_failure(message: &str, code: u8) -> ExitCode {
    // stderr is the last resort; a failed write has nowhere else to go.
    writeln!(std::io::stderr().lock(), "taskboard: {message}").ok();
    ExitCode::from(code)
}
