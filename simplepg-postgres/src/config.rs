//! Host configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use simplepg_dsn::DsnCodec;

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{StoreError, StoreResult};

/// Connection string used when nothing else is configured.
pub const DEFAULT_URL: &str = "postgres@localhost/test";

/// Database used to issue `CREATE DATABASE`.
pub const DEFAULT_MAINTENANCE_DATABASE: &str = "postgres";

/// Primary environment variable holding the connection string.
pub const URL_VAR: &str = "SIMPLEPG_URL";

/// Fallback environment variable holding the connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable enabling verbose diagnostics.
pub const VERBOSE_VAR: &str = "SIMPLEPG_VERBOSE";

/// Configuration for a [`Host`](crate::Host).
///
/// The `url` is the loosely written connection string users type, for
/// example `bob:secret@db.local/shop`. It is canonicalized by
/// [`simplepg_dsn`] before it reaches the driver.
///
/// Can be loaded from TOML:
///
/// ```toml
/// [database]
/// url = "bob:secret@db.local/shop"
/// verbose = true
/// connect_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Raw connection string.
    pub url: String,
    /// Log connection string fields and lifecycle events.
    pub verbose: bool,
    /// Database to connect to while creating the target database.
    pub maintenance_database: String,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            verbose: false,
            maintenance_database: DEFAULT_MAINTENANCE_DATABASE.to_string(),
            connect_timeout_secs: Some(30),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: HostConfig,
}

impl HostConfig {
    /// Create a configuration for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Load the `[database]` section of a TOML document.
    pub fn from_toml(input: &str) -> StoreResult<Self> {
        let file: ConfigFile = toml::from_str(input)
            .map_err(|e| StoreError::config(format!("invalid TOML: {}", e)))?;
        Ok(file.database)
    }

    /// Read `SIMPLEPG_URL` (or `DATABASE_URL`) and `SIMPLEPG_VERBOSE`.
    pub fn from_env() -> Self {
        Self::from_env_source(&ProcessEnv)
    }

    /// Like [`from_env`](Self::from_env), reading from `source`.
    pub fn from_env_source<S: EnvSource>(source: &S) -> Self {
        let mut config = Self::default();
        if let Some(url) = source.url() {
            config.url = url;
        }
        if let Some(verbose) = source.verbose() {
            config.verbose = verbose;
        }
        config
    }

    /// Set the connection string.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Enable or disable verbose diagnostics.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the maintenance database.
    pub fn maintenance_database(mut self, database: impl Into<String>) -> Self {
        self.maintenance_database = database.into();
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Wait for connections without a timeout.
    pub fn no_connect_timeout(mut self) -> Self {
        self.connect_timeout_secs = None;
        self
    }

    /// The connection timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// The codec used for this configuration.
    pub fn codec(&self) -> DsnCodec {
        DsnCodec::new().verbose(self.verbose)
    }

    /// Canonicalize `url`, returning the driver string and the database name.
    pub fn rebuild(&self) -> (String, String) {
        self.codec().rebuild(&self.url)
    }

    /// Build a driver configuration from a canonical connection string.
    pub(crate) fn to_pg_config(&self, dsn: &str) -> StoreResult<tokio_postgres::Config> {
        let mut pg_config: tokio_postgres::Config = dsn.parse()?;
        if let Some(timeout) = self.timeout() {
            pg_config.connect_timeout(timeout);
        }
        Ok(pg_config)
    }
}
