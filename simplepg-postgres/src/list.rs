//! Ordered lists of strings stored in a table.

use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::host::Host;
use crate::sql::quote_identifier;

/// Column holding list values.
pub const LIST_COLUMN: &str = "list_col";

/// An ordered list of strings.
///
/// Backed by a table `<name>(id BIGSERIAL PRIMARY KEY, list_col TEXT)`;
/// insertion order is the order of `id`.
///
/// ```rust,ignore
/// let host = Host::connect_url("localhost/app").await?;
/// let log = List::new(&host, "audit_log").await?;
/// log.add("login").await?;
/// assert_eq!(log.get_last().await?, Some("login".to_string()));
/// ```
pub struct List<'a> {
    host: &'a Host,
    name: String,
    table: String,
}

impl<'a> List<'a> {
    /// Open the list `name`, creating its table if needed.
    pub async fn new(host: &'a Host, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        let table = quote_identifier(&name)?;

        host.execute(&create_table_sql(&table), &[]).await?;
        if host.verbose() {
            info!(table = %name, database = %host.database(), "Created table");
        }

        Ok(Self { host, name, table })
    }

    /// The list name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a value.
    pub async fn add(&self, value: &str) -> StoreResult<()> {
        let sql = format!("INSERT INTO {} ({}) VALUES ($1)", self.table, LIST_COLUMN);
        self.host.execute(&sql, &[&value]).await?;
        Ok(())
    }

    /// All values in insertion order.
    pub async fn get_all(&self) -> StoreResult<Vec<String>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", LIST_COLUMN, self.table);
        let rows = self.host.query(&sql, &[]).await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get(0))
            .collect::<Result<Vec<String>, _>>()?)
    }

    /// The most recently added value.
    pub async fn get_last(&self) -> StoreResult<Option<String>> {
        // MAX(id) lookup avoids sorting the table
        let sql = format!(
            "SELECT {col} FROM {table} WHERE id = (SELECT MAX(id) FROM {table})",
            col = LIST_COLUMN,
            table = self.table
        );
        let row = self.host.query_opt(&sql, &[]).await?;
        Ok(row.map(|row| row.try_get::<_, String>(0)).transpose()?)
    }

    /// The `n` most recently added values, oldest first.
    ///
    /// Fails with [`StoreError::TooFewElements`] when the list is shorter
    /// than `n`.
    pub async fn get_last_n(&self, n: usize) -> StoreResult<Vec<String>> {
        let sql = last_n_sql(&self.table);
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let rows = self.host.query(&sql, &[&limit]).await?;
        let values = rows
            .iter()
            .map(|row| row.try_get(0))
            .collect::<Result<Vec<String>, _>>()?;

        if values.len() < n {
            return Err(StoreError::TooFewElements {
                table: self.name.clone(),
                wanted: n,
                found: values.len(),
            });
        }
        Ok(values)
    }

    /// Remove all values.
    pub async fn clear(&self) -> StoreResult<()> {
        let sql = format!("TRUNCATE TABLE {}", self.table);
        self.host.execute(&sql, &[]).await?;
        Ok(())
    }

    /// Drop the list's table.
    pub async fn remove(self) -> StoreResult<()> {
        let sql = format!("DROP TABLE {}", self.table);
        self.host.execute(&sql, &[]).await?;
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id BIGSERIAL PRIMARY KEY, {} TEXT)",
        table, LIST_COLUMN
    )
}

fn last_n_sql(table: &str) -> String {
    format!(
        "SELECT {col} FROM (SELECT id, {col} FROM {table} ORDER BY id DESC LIMIT $1) AS sub ORDER BY id ASC",
        col = LIST_COLUMN,
        table = table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        assert_eq!(
            create_table_sql("\"events\""),
            "CREATE TABLE IF NOT EXISTS \"events\" (id BIGSERIAL PRIMARY KEY, list_col TEXT)"
        );
    }

    #[test]
    fn test_last_n_sql() {
        let sql = last_n_sql("\"events\"");
        assert!(sql.starts_with("SELECT list_col FROM (SELECT id, list_col FROM \"events\""));
        assert!(sql.contains("ORDER BY id DESC LIMIT $1"));
        assert!(sql.ends_with("ORDER BY id ASC"));
    }
}
