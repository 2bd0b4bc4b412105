//! Service configuration.
//!
//! Values come from defaults, then environment variables; front ends may
//! override individual fields afterwards (for example from CLI flags).
//!
//! Environment variables:
//! - `PLANETS_DB_PATH`: SQLite database file (default `planets.sqlite3`)
//! - `PLANETS_SWAPI_URL`: enrichment base URL (default `https://swapi.dev/api`)
//! - `PLANETS_ENRICHMENT_TIMEOUT_SECS`: enrichment timeout (default 10)
//! - `PLANETS_LOG_LEVEL`: `trace|debug|info|warn|error` (default per build mode)
//! - `PLANETS_LOG_DIR`: absolute log directory; unset disables file logging

use crate::logging::default_log_level;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_FILE_NAME: &str = "planets.sqlite3";
pub const DEFAULT_SWAPI_BASE_URL: &str = "https://swapi.dev/api";
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration for one service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub swapi_base_url: String,
    pub enrichment_timeout: Duration,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            swapi_base_url: DEFAULT_SWAPI_BASE_URL.to_string(),
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values fall back to defaults; an unparsable timeout is logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value("PLANETS_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(url) = value("PLANETS_SWAPI_URL") {
            config.swapi_base_url = url;
        }
        if let Some(raw) = value("PLANETS_ENRICHMENT_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.enrichment_timeout = Duration::from_secs(secs),
                _ => warn!(
                    "event=config_load module=config status=ignored key=PLANETS_ENRICHMENT_TIMEOUT_SECS value={raw}"
                ),
            }
        }
        if let Some(level) = value("PLANETS_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_dir = value("PLANETS_LOG_DIR").map(PathBuf::from);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceConfig, DEFAULT_ENRICHMENT_TIMEOUT, DEFAULT_SWAPI_BASE_URL};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.swapi_base_url, DEFAULT_SWAPI_BASE_URL);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("PLANETS_DB_PATH", "/var/lib/planets/db.sqlite3"),
            ("PLANETS_SWAPI_URL", "http://localhost:9000/api"),
            ("PLANETS_ENRICHMENT_TIMEOUT_SECS", "3"),
            ("PLANETS_LOG_LEVEL", "warn"),
            ("PLANETS_LOG_DIR", "/var/log/planets"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/planets/db.sqlite3"));
        assert_eq!(config.swapi_base_url, "http://localhost:9000/api");
        assert_eq!(config.enrichment_timeout, Duration::from_secs(3));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/planets")));
    }

    #[test]
    fn invalid_or_blank_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("PLANETS_ENRICHMENT_TIMEOUT_SECS", "soon"),
            ("PLANETS_SWAPI_URL", "   "),
        ]));
        assert_eq!(config.enrichment_timeout, DEFAULT_ENRICHMENT_TIMEOUT);
        assert_eq!(config.swapi_base_url, DEFAULT_SWAPI_BASE_URL);
    }
}
