//! Error types for simplepg operations.

use thiserror::Error;

/// Result type for simplepg operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the database.
///
/// Connection string parsing never fails, so a malformed string surfaces
/// here as a [`Postgres`](Self::Postgres) error once the driver rejects it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// PostgreSQL error.
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A table or database name that cannot be used as an identifier.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Fewer rows than requested.
    #[error("too few elements in table '{table}': wanted {wanted}, found {found}")]
    TooFewElements {
        /// Table name.
        table: String,
        /// Requested number of elements.
        wanted: usize,
        /// Number of elements present.
        found: usize,
    },

    /// A set table holds the same value more than once.
    #[error("duplicate members in set '{table}': {value}")]
    DuplicateMembers {
        /// Table name.
        table: String,
        /// The duplicated value.
        value: String,
    },
}

impl StoreError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier(name.into())
    }

    /// Check if the connection to the server failed or was lost.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Postgres(e) => {
                e.is_closed()
                    || std::error::Error::source(e)
                        .is_some_and(|source| source.is::<std::io::Error>())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = StoreError::config("bad toml");
        assert!(matches!(err, StoreError::Config(_)));
        assert!(!err.is_connection_error());

        let err = StoreError::invalid_identifier("drop table");
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_client_side_driver_error_is_not_connection_error() {
        let err: StoreError = "host=localhost port=notaport"
            .parse::<tokio_postgres::Config>()
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Postgres(_)));
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::TooFewElements {
            table: "events".into(),
            wanted: 5,
            found: 2,
        };
        let message = err.to_string();
        assert!(message.contains("events"));
        assert!(message.contains("wanted 5"));
        assert!(message.contains("found 2"));

        let err = StoreError::invalid_identifier("1abc");
        assert_eq!(err.to_string(), "invalid identifier '1abc'");
    }
}
