//! Runtime configuration: database location, level source and poll cadence.
//!
//! Values start from built-in defaults, then environment variables override
//! them, then the CLI layers its own flags on top.

use crate::error::{AquaError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed database file name.
pub const DATABASE_NAME: &str = "aquasentry.db";

/// Remote JSON resource reporting the tank fill level.
pub const DEFAULT_LEVEL_URL: &str = "https://profgeorgevagner.github.io/data.json";

/// Poll cadence for the level gauge.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

pub const DB_PATH_ENV_VAR: &str = "AQUASENTRY_DB_PATH";
pub const LEVEL_URL_ENV_VAR: &str = "AQUASENTRY_LEVEL_URL";
pub const POLL_INTERVAL_ENV_VAR: &str = "AQUASENTRY_POLL_INTERVAL_MS";
pub const RESET_SCHEMA_ENV_VAR: &str = "AQUASENTRY_RESET_SCHEMA";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub level_url: String,
    pub poll_interval: Duration,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    /// Drop and recreate every table on open instead of migrating.
    pub reset_schema: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            level_url: DEFAULT_LEVEL_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
            reset_schema: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any `AQUASENTRY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV_VAR) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(url) = lookup(LEVEL_URL_ENV_VAR) {
            config.level_url = url;
        }

        if let Some(raw) = lookup(POLL_INTERVAL_ENV_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|_| AquaError::Config {
                message: format!("{POLL_INTERVAL_ENV_VAR} must be a whole number of milliseconds, got {raw:?}"),
            })?;
            if millis == 0 {
                return Err(AquaError::Config {
                    message: format!("{POLL_INTERVAL_ENV_VAR} must be greater than zero"),
                });
            }
            config.poll_interval = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(RESET_SCHEMA_ENV_VAR) {
            config.reset_schema = parse_flag(&raw).ok_or_else(|| AquaError::Config {
                message: format!("{RESET_SCHEMA_ENV_VAR} must be true/false/1/0, got {raw:?}"),
            })?;
        }

        Ok(config)
    }
}

/// `<data dir>/aquasentry/aquasentry.db`, falling back to the working directory.
pub fn default_database_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".local");
        home.push("share");
        home
    });
    base.join("aquasentry").join(DATABASE_NAME)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
