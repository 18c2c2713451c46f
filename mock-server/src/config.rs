//! Environment-driven settings for the mock server binary.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen port (default: 3000)
    pub port: u16,
    /// Fallback log filter when `RUST_LOG` is unset (default: info)
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}
