//! Layered application settings.
//!
//! Settings are resolved from built-in defaults, then an optional TOML file,
//! then `TASKBOARD__`-prefixed environment variables, with later sources
//! taking precedence. Nested keys use `__` as the separator, so
//! `TASKBOARD__STORE__HOST` sets `store.host`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Base name of the optional settings file looked up in the working
/// directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "taskboard";

/// Database the server always provides, used to create the board database.
pub const MAINTENANCE_DATABASE: &str = "postgres";

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Backing store connection settings.
    pub store: StoreSettings,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}

/// Connection settings for the `PostgreSQL` task store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub username: String,
    /// Login password. Never logged.
    pub password: SecretString,
    /// Database holding the task table; created at startup when missing.
    pub database: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Seconds to wait for a connection before giving up.
    pub connect_timeout_secs: u64,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Settings {
    /// Loads settings from defaults, a settings file, and the environment.
    ///
    /// When `path` is `None`, `taskboard.toml` in the working directory is
    /// read if present. An explicit `path` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or the merged
    /// values do not deserialize into [`Settings`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = with_file_source(defaults()?, path).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store.host", "localhost")?
        .set_default("store.port", 5432)?
        .set_default("store.username", "postgres")?
        .set_default("store.password", "")?
        .set_default("store.database", "todo_db")?
        .set_default("store.pool_size", 4)?
        .set_default("store.connect_timeout_secs", 5)?
        .set_default("telemetry.log_level", "info")?
        .set_default("telemetry.json", false)
}

fn with_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(explicit) => builder.add_source(File::from(explicit).required(true)),
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    }
}

impl StoreSettings {
    /// Returns the libpq connection string for the board database.
    #[must_use]
    pub fn conninfo(&self) -> SecretString {
        self.conninfo_for(&self.database)
    }

    /// Returns the libpq connection string for the maintenance database.
    #[must_use]
    pub fn maintenance_conninfo(&self) -> SecretString {
        self.conninfo_for(MAINTENANCE_DATABASE)
    }

    /// Returns the connection acquisition timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn conninfo_for(&self, database: &str) -> SecretString {
        let conninfo = format!(
            "host={} port={} user={} password={} dbname={} connect_timeout={}",
            quote_conninfo_value(&self.host),
            self.port,
            quote_conninfo_value(&self.username),
            quote_conninfo_value(self.password.expose_secret()),
            quote_conninfo_value(database),
            self.connect_timeout_secs,
        );
        SecretString::from(conninfo)
    }
}

/// Quotes a libpq keyword/value parameter, escaping `\` and `'`.
fn quote_conninfo_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}
