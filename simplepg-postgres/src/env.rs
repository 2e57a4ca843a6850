//! Environment lookups for [`HostConfig`](crate::HostConfig).

use std::collections::HashMap;

use crate::config::{DATABASE_URL_VAR, URL_VAR, VERBOSE_VAR};

/// Where [`HostConfig::from_env_source`](crate::HostConfig::from_env_source)
/// reads its settings from.
pub trait EnvSource {
    /// Raw value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Connection string from `SIMPLEPG_URL`, falling back to `DATABASE_URL`.
    fn url(&self) -> Option<String> {
        self.var(URL_VAR).or_else(|| self.var(DATABASE_URL_VAR))
    }

    /// Verbose flag from `SIMPLEPG_VERBOSE`.
    fn verbose(&self) -> Option<bool> {
        self.var(VERBOSE_VAR).map(|value| parse_flag(&value))
    }
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests and for embedding simplepg in
/// programs that keep their settings elsewhere.
#[derive(Debug, Clone, Default)]
pub struct FixedEnv {
    vars: HashMap<String, String>,
}

impl FixedEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for FixedEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_prefers_simplepg_url() {
        let env = FixedEnv::new()
            .with(URL_VAR, "primary/app")
            .with(DATABASE_URL_VAR, "fallback/app");
        assert_eq!(env.url().as_deref(), Some("primary/app"));

        let env = FixedEnv::new().with(DATABASE_URL_VAR, "fallback/app");
        assert_eq!(env.url().as_deref(), Some("fallback/app"));

        assert_eq!(FixedEnv::new().url(), None);
    }

    #[test]
    fn test_verbose_flag() {
        for value in ["1", "true", "TRUE", " on ", "yes"] {
            let env = FixedEnv::new().with(VERBOSE_VAR, value);
            assert_eq!(env.verbose(), Some(true), "{value:?}");
        }
        for value in ["0", "false", "", "verbose"] {
            let env = FixedEnv::new().with(VERBOSE_VAR, value);
            assert_eq!(env.verbose(), Some(false), "{value:?}");
        }
        assert_eq!(FixedEnv::new().verbose(), None);
    }

    #[test]
    fn test_process_env_missing_var() {
        assert!(ProcessEnv.var("SIMPLEPG_SURELY_UNSET_VARIABLE").is_none());
    }
}
