//! Environment variable helpers
//!
//! Blank values are treated the same as unset ones.

use std::str::FromStr;

/// Non-blank value of `key`, trimmed.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parsed value of `key`. Unparseable values are logged and ignored.
pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}

/// Comma separated list, empty entries dropped.
pub fn env_list(key: &str) -> Vec<String> {
    env_string(key)
        .map(|raw| split_list(&raw))
        .unwrap_or_default()
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
