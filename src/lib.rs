//! # simplepg
//!
//! Lists and sets of strings stored in PostgreSQL, reached through forgiving
//! connection strings.
//!
//! simplepg provides:
//! - A total connection string codec: any string parses, missing parts get
//!   defaults, and the result is rebuilt into a canonical `postgres://` URL
//! - A [`Host`](postgres::Host) that creates its database on demand
//! - Table-backed [`List`](postgres::List) and [`Set`](postgres::Set) types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simplepg::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StoreError> {
//!     let host = Host::connect(HostConfig::new("postgres:secret@localhost/shop").verbose(true)).await?;
//!
//!     let recent = List::new(&host, "recent_orders").await?;
//!     recent.add("order-17").await?;
//!     println!("{:?}", recent.get_last_n(1).await?);
//!
//!     host.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Connection Strings
//!
//! ```rust
//! let (dsn, database) = simplepg::dsn::rebuild("bob@db.local/shop");
//! assert_eq!(dsn, "postgres://bob@db.local:5432/shop?sslmode=disable");
//! assert_eq!(database, "shop");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection string parsing and canonicalization.
pub mod dsn {
    pub use simplepg_dsn::*;
}

/// PostgreSQL host, lists and sets.
pub mod postgres {
    pub use simplepg_postgres::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dsn::{DsnCodec, ParsedConnection};
    pub use crate::postgres::prelude::*;
}

// Re-export key types at the crate root
pub use dsn::{DsnCodec, ParsedConnection};
pub use postgres::{Host, HostConfig, List, Set, StoreError, StoreResult};
