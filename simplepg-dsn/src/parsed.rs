//! The decoded form of a connection string.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::codec::DsnCodec;

/// A connection string split into its fields.
///
/// Empty strings mean "absent". Because an empty password is a legitimate
/// value, `has_password` records whether a password field was supplied at
/// all (`user:@host` versus `user@host`).
///
/// A `ParsedConnection` is a plain value: it is built fresh by
/// [`DsnCodec::parse`] and usually discarded right after
/// [`DsnCodec::encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedConnection {
    /// Username, empty if absent.
    pub username: String,
    /// Password, empty if absent or explicitly empty.
    pub password: String,
    /// Whether a password field was present.
    pub has_password: bool,
    /// Host, empty if absent.
    pub host: String,
    /// Port, empty if absent. Set to the default port whenever a host is given.
    pub port: String,
    /// Database name. Parsing falls back to the default when none is named.
    pub database: String,
    /// Raw query-argument tail such as `sslmode=require&application_name=x`.
    pub args: String,
}

impl ParsedConnection {
    /// Get the username.
    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    /// Get the password, including an explicitly empty one.
    pub fn password(&self) -> Option<&str> {
        if self.has_password || !self.password.is_empty() {
            Some(&self.password)
        } else {
            None
        }
    }

    /// Get the host.
    pub fn host(&self) -> Option<&str> {
        non_empty(&self.host)
    }

    /// Get the port as written.
    pub fn port(&self) -> Option<&str> {
        non_empty(&self.port)
    }

    /// Get the port as a number, if it is one.
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the raw argument tail.
    pub fn args(&self) -> Option<&str> {
        non_empty(&self.args)
    }

    /// Iterate over the `key=value` pairs of the argument tail.
    ///
    /// Pairs without `=` are skipped.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.args
            .split('&')
            .filter_map(|pair| pair.split_once('='))
    }

    /// Look up a single argument by key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// The password as it may appear in diagnostics.
    pub(crate) fn redacted_password(&self) -> &'static str {
        if self.password.is_empty() {
            ""
        } else {
            "********"
        }
    }
}

impl FromStr for ParsedConnection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DsnCodec::new().parse(s))
    }
}

impl fmt::Display for ParsedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DsnCodec::new().encode(self))
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
