//! Database host connection.

use tokio::task::JoinHandle;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::error::StoreResult;
use crate::sql::quote_identifier;

/// A connection to one database on a PostgreSQL server.
///
/// Connecting creates the target database when it does not exist yet.
/// [`List`](crate::List) and [`Set`](crate::Set) borrow a `Host` and live in
/// its current database.
pub struct Host {
    client: Client,
    driver: JoinHandle<()>,
    pg_config: tokio_postgres::Config,
    database: String,
    config: HostConfig,
}

impl Host {
    /// Connect using `config`.
    ///
    /// Canonicalizes the connection string, connects to the maintenance
    /// database, creates the target database if needed and then connects to
    /// it.
    pub async fn connect(config: HostConfig) -> StoreResult<Self> {
        let (dsn, database) = config.rebuild();
        quote_identifier(&database)?;
        let pg_config = config.to_pg_config(&dsn)?;

        let maintenance = with_dbname(&pg_config, &config.maintenance_database);
        let (admin, admin_driver) = open(&maintenance).await?;
        ping(&admin).await?;
        create_database(&admin, &database, config.verbose).await?;
        shutdown(admin, admin_driver).await;

        let pg_config = with_dbname(&pg_config, &database);
        let (client, driver) = open(&pg_config).await?;
        if config.verbose {
            info!(database = %database, "Using database");
        }

        Ok(Self {
            client,
            driver,
            pg_config,
            database,
            config,
        })
    }

    /// Connect using a raw connection string and default settings.
    pub async fn connect_url(url: impl Into<String>) -> StoreResult<Self> {
        Self::connect(HostConfig::new(url)).await
    }

    /// Connect to the default server and database.
    pub async fn connect_default() -> StoreResult<Self> {
        Self::connect(HostConfig::default()).await
    }

    /// Connect using `SIMPLEPG_URL` / `DATABASE_URL`.
    pub async fn connect_env() -> StoreResult<Self> {
        Self::connect(HostConfig::from_env()).await
    }

    /// Check that the server still answers.
    pub async fn ping(&self) -> StoreResult<()> {
        ping(&self.client).await
    }

    /// Switch to `database`, creating it if needed.
    ///
    /// Lists and sets borrow the host, so none can be alive across a switch.
    pub async fn select_database(&mut self, database: &str) -> StoreResult<()> {
        create_database(&self.client, database, self.config.verbose).await?;

        let pg_config = with_dbname(&self.pg_config, database);
        let (client, driver) = open(&pg_config).await?;
        let previous = std::mem::replace(&mut self.client, client);
        let previous_driver = std::mem::replace(&mut self.driver, driver);
        shutdown(previous, previous_driver).await;
        self.pg_config = pg_config;
        self.database = database.to_string();

        if self.config.verbose {
            info!(database = %database, "Using database");
        }
        Ok(())
    }

    /// The current database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The configuration this host was created from.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The underlying driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Close the connection.
    pub async fn close(self) {
        shutdown(self.client, self.driver).await;
        if self.config.verbose {
            info!(database = %self.database, "Connection closed");
        }
    }

    pub(crate) fn verbose(&self) -> bool {
        self.config.verbose
    }

    pub(crate) async fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        debug!(sql = %sql, "Executing statement");
        Ok(self.client.execute(sql, params).await?)
    }

    pub(crate) async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        debug!(sql = %sql, "Executing query");
        Ok(self.client.query(sql, params).await?)
    }

    pub(crate) async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        debug!(sql = %sql, "Executing query_opt");
        Ok(self.client.query_opt(sql, params).await?)
    }
}

/// Check that the server behind `url` answers, without creating anything.
pub async fn test_connection(url: &str) -> StoreResult<()> {
    test_connection_with(&HostConfig::new(url)).await
}

/// Like [`test_connection`], using a full configuration.
pub async fn test_connection_with(config: &HostConfig) -> StoreResult<()> {
    let (dsn, _) = config.rebuild();
    let (client, driver) = open(&config.to_pg_config(&dsn)?).await?;
    let result = ping(&client).await;

    if config.verbose {
        match &result {
            Ok(()) => info!("Ping: ok"),
            Err(e) => info!(error = %e, "Ping: failed"),
        }
    }

    shutdown(client, driver).await;
    result
}

async fn open(pg_config: &tokio_postgres::Config) -> StoreResult<(Client, JoinHandle<()>)> {
    let (client, connection) = pg_config.connect(NoTls).await?;
    let driver = tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "PostgreSQL connection closed with error");
        }
    });
    Ok((client, driver))
}

/// Drop the client and wait for its connection task to finish.
async fn shutdown(client: Client, driver: JoinHandle<()>) {
    drop(client);
    if let Err(e) = driver.await {
        debug!(error = %e, "Connection task ended abnormally");
    }
}

async fn ping(client: &Client) -> StoreResult<()> {
    client.simple_query("SELECT 1").await?;
    Ok(())
}

async fn create_database(client: &Client, database: &str, verbose: bool) -> StoreResult<()> {
    let quoted = quote_identifier(database)?;

    let exists = client
        .query_opt("SELECT 1 FROM pg_database WHERE datname = $1", &[&database])
        .await?
        .is_some();
    if exists {
        debug!(database = %database, "Database exists");
        return Ok(());
    }

    let sql = create_database_sql(&quoted);
    debug!(sql = %sql, "Executing statement");
    match client.batch_execute(&sql).await {
        Ok(()) => {}
        // Created concurrently by someone else
        Err(e) if e.code() == Some(&SqlState::DUPLICATE_DATABASE) => {}
        Err(e) => return Err(e.into()),
    }

    if verbose {
        info!(database = %database, "Created database");
    }
    Ok(())
}

fn create_database_sql(quoted: &str) -> String {
    format!("CREATE DATABASE {}", quoted)
}

fn with_dbname(pg_config: &tokio_postgres::Config, database: &str) -> tokio_postgres::Config {
    let mut pg_config = pg_config.clone();
    pg_config.dbname(database);
    pg_config
}
