//! Structured fuzz target for the connection string codec.
//!
//! Builds connection strings from arbitrary parts, so the fuzzer spends its
//! time near the delimiters the parser cares about. When every part is free
//! of delimiters the string is well formed and must survive encoding.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_dsn_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simplepg_dsn::{DEFAULT_ARGS, encode, parse};

/// A connection string assembled from optional parts.
#[derive(Debug, Arbitrary)]
struct FuzzDsn {
    scheme: bool,
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    args: Option<Vec<(String, String)>>,
}

impl FuzzDsn {
    fn to_dsn(&self) -> String {
        let mut dsn = String::new();
        if self.scheme {
            dsn.push_str("postgres://");
        }
        if self.username.is_some() || self.password.is_some() {
            dsn.push_str(self.username.as_deref().unwrap_or_default());
            if let Some(ref password) = self.password {
                dsn.push(':');
                dsn.push_str(password);
            }
            dsn.push('@');
        }
        if let Some(ref host) = self.host {
            dsn.push_str(host);
            if let Some(port) = self.port {
                dsn.push(':');
                dsn.push_str(&port.to_string());
            }
        }
        if let Some(ref database) = self.database {
            dsn.push('/');
            dsn.push_str(database);
        }
        if let Some(ref args) = self.args {
            let pairs: Vec<String> = args.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            dsn.push('?');
            dsn.push_str(&pairs.join("&"));
        }
        dsn
    }

    /// Every present part is a plain token and a database is named.
    fn is_well_formed(&self) -> bool {
        let parts_clean = [&self.username, &self.password, &self.host, &self.database]
            .into_iter()
            .flatten()
            .all(|part| is_token(part));
        let args_clean = self.args.as_ref().is_none_or(|args| {
            !args.is_empty() && args.iter().all(|(k, v)| is_token(k) && is_token(v))
        });
        parts_clean && args_clean && self.database.is_some()
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fuzz_target!(|input: FuzzDsn| {
    let parsed = parse(&input.to_dsn());
    let encoded = encode(&parsed);

    if parsed.args.is_empty() {
        assert!(encoded.ends_with(DEFAULT_ARGS));
    }

    if input.is_well_formed() {
        let normalized = parse(&encoded);
        assert_eq!(parse(&encode(&normalized)), normalized);
        if input.args.is_some() {
            assert_eq!(normalized, parsed);
        }
    }
});
