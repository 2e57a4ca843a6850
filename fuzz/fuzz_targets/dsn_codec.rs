//! Fuzz target for the connection string codec.
//!
//! Parsing is total, so arbitrary input must never panic, and the encoder
//! must always produce a string with the scheme and an argument tail.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_dsn_codec
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use simplepg_dsn::{DEFAULT_ARGS, SCHEME, encode, parse, rebuild};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed = parse(input);
        let encoded = encode(&parsed);

        assert!(encoded.starts_with(SCHEME));
        if parsed.args.is_empty() {
            assert!(encoded.ends_with(DEFAULT_ARGS));
        }

        let (dsn, database) = rebuild(input);
        assert_eq!(dsn, encoded);
        assert_eq!(database, parsed.database);
    }
});
