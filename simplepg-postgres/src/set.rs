//! Unordered sets of strings stored in a table.

use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::host::Host;
use crate::sql::quote_identifier;

/// Column holding set members.
pub const SET_COLUMN: &str = "set_col";

/// A set of strings.
///
/// Backed by a table `<name>(set_col TEXT)`. Membership is checked before
/// every insert, so each value is stored at most once.
pub struct Set<'a> {
    host: &'a Host,
    name: String,
    table: String,
}

impl<'a> Set<'a> {
    /// Open the set `name`, creating its table if needed.
    pub async fn new(host: &'a Host, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        let table = quote_identifier(&name)?;

        host.execute(&create_table_sql(&table), &[]).await?;
        if host.verbose() {
            info!(table = %name, database = %host.database(), "Created table");
        }

        Ok(Self { host, name, table })
    }

    /// The set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a value unless it is already a member.
    pub async fn add(&self, value: &str) -> StoreResult<()> {
        if self.has(value).await? {
            return Ok(());
        }
        let sql = format!("INSERT INTO {} ({}) VALUES ($1)", self.table, SET_COLUMN);
        self.host.execute(&sql, &[&value]).await?;
        Ok(())
    }

    /// Check whether `value` is a member.
    pub async fn has(&self, value: &str) -> StoreResult<bool> {
        let sql = format!(
            "SELECT {col} FROM {table} WHERE {col} = $1",
            col = SET_COLUMN,
            table = self.table
        );
        let rows = self.host.query(&sql, &[&value]).await?;
        match rows.len() {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(StoreError::DuplicateMembers {
                table: self.name.clone(),
                value: value.to_string(),
            }),
        }
    }

    /// All members, in no particular order.
    pub async fn get_all(&self) -> StoreResult<Vec<String>> {
        let sql = format!("SELECT {} FROM {}", SET_COLUMN, self.table);
        let rows = self.host.query(&sql, &[]).await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get(0))
            .collect::<Result<Vec<String>, _>>()?)
    }

    /// Remove `value` if present.
    pub async fn del(&self, value: &str) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", self.table, SET_COLUMN);
        self.host.execute(&sql, &[&value]).await?;
        Ok(())
    }

    /// Remove all members.
    pub async fn clear(&self) -> StoreResult<()> {
        let sql = format!("TRUNCATE TABLE {}", self.table);
        self.host.execute(&sql, &[]).await?;
        Ok(())
    }

    /// Drop the set's table.
    pub async fn remove(self) -> StoreResult<()> {
        let sql = format!("DROP TABLE {}", self.table);
        self.host.execute(&sql, &[]).await?;
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {} ({} TEXT)", table, SET_COLUMN)
}
