//! Process configuration, read once at startup from the environment.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_DB_PATH: &str = ".sqlite3/todo.db";
const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HEAVY_DELAY_MS: u64 = 5000;

/// Expected HTTP Basic credentials for protected routes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    pub user_id: String,
    pub password: String,
}

impl BasicAuthCredentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        BasicAuthCredentials {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// True when the pair matches. An unconfigured (empty) user id never matches.
    pub fn matches(&self, user_id: &str, password: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id && self.password == password
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub basic_auth: BasicAuthCredentials,
    /// Deadline applied to every service operation.
    pub db_timeout: Duration,
    pub shutdown_timeout: Duration,
    /// Artificial delay of the `/heavy` diagnostic route.
    pub heavy_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            basic_auth: BasicAuthCredentials::default(),
            db_timeout: Duration::from_secs(DEFAULT_DB_TIMEOUT_SECS),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            heavy_delay: Duration::from_millis(DEFAULT_HEAVY_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Build from process environment: `PORT`, `DB_PATH`, `BASIC_AUTH_USER_ID`,
    /// `BASIC_AUTH_PASSWORD`, `DB_TIMEOUT_SECS`, `SHUTDOWN_TIMEOUT_SECS`, `HEAVY_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        let port = match get("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => defaults.port,
        };
        let db_path = get("DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path);
        let basic_auth = BasicAuthCredentials {
            user_id: lookup("BASIC_AUTH_USER_ID").unwrap_or_default(),
            password: lookup("BASIC_AUTH_PASSWORD").unwrap_or_default(),
        };
        let db_timeout = match get("DB_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_u64("DB_TIMEOUT_SECS", &raw)?),
            None => defaults.db_timeout,
        };
        let shutdown_timeout = match get("SHUTDOWN_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_u64("SHUTDOWN_TIMEOUT_SECS", &raw)?),
            None => defaults.shutdown_timeout,
        };
        let heavy_delay = match get("HEAVY_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_u64("HEAVY_DELAY_MS", &raw)?),
            None => defaults.heavy_delay,
        };

        Ok(AppConfig {
            port,
            db_path,
            basic_auth,
            db_timeout,
            shutdown_timeout,
            heavy_delay,
        })
    }
}

/// Accepts both `8081` and the listen-address style `:8081`.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(':')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| ConfigError::Invalid {
            key: "PORT",
            value: raw.to_string(),
        })
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
