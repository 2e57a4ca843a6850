//! Identifier handling for table and database names.
//!
//! Names are spliced into DDL, so only plain identifiers are accepted. They
//! are double-quoted to keep their case; since a plain identifier never holds
//! a `"`, no escaping is needed. Values never go through here; they are
//! always bound as parameters.

use crate::error::{StoreError, StoreResult};

/// Longest identifier PostgreSQL stores without truncating it.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Check that `name` is a plain identifier.
///
/// Accepted: ASCII letters, digits and `_`, not starting with a digit, at
/// most [`MAX_IDENTIFIER_LEN`] bytes.
pub fn validate_identifier(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
        Ok(())
    } else {
        Err(StoreError::invalid_identifier(name))
    }
}

/// Validate `name` and return it double-quoted.
pub fn quote_identifier(name: &str) -> StoreResult<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name))
}
