//! # simplepg-postgres
//!
//! Simple PostgreSQL-backed collections.
//!
//! This crate provides:
//! - [`Host`]: a connection to one database, created on demand
//! - [`List`]: an ordered list of strings stored in a table
//! - [`Set`]: a set of strings stored in a table
//! - [`HostConfig`]: configuration from code, TOML or the environment
//!
//! Connection strings are written loosely (`bob:secret@db.local/shop`,
//! `localhost`, `/shop`) and canonicalized by [`simplepg_dsn`] before they
//! reach the driver.
//!
//! ## Example
//!
//! ```rust,ignore
//! use simplepg_postgres::{Host, List, Set};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Host::connect_url("postgres:secret@localhost/shop").await?;
//!
//!     let orders = List::new(&host, "orders").await?;
//!     orders.add("order-1").await?;
//!
//!     let customers = Set::new(&host, "customers").await?;
//!     customers.add("alice").await?;
//!     assert!(customers.has("alice").await?);
//!
//!     host.close().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod host;
pub mod list;
pub mod set;
pub mod sql;

pub use config::HostConfig;
pub use env::{EnvSource, FixedEnv, ProcessEnv};
pub use error::{StoreError, StoreResult};
pub use host::{Host, test_connection, test_connection_with};
pub use list::List;
pub use set::Set;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::HostConfig;
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::host::Host;
    pub use crate::list::List;
    pub use crate::set::Set;
}
