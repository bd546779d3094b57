//! Environment-driven server configuration.
//!
//! Every key has a default so a bare `cargo run` serves against a local
//! SQLite file. Invalid values are startup errors.

use std::{env, fmt::Display, str::FromStr};

use axum::http::HeaderValue;
use log::info;
use portfolio_core::{default_log_level, DbError, DbLocation};
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./test.db";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "https://portfolio-mark22.vercel.app";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value `{value}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid DATABASE_URL: {0}")]
    Database(#[from] DbError),

    #[error("DATABASE_URL `{0}` is private to each connection; use a file-backed store")]
    UnsharedDatabase(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DbLocation,
    pub frontend_origin: HeaderValue,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database = DbLocation::parse(&database_url)?;
        if !database.is_shared() {
            return Err(ConfigError::UnsharedDatabase(database_url));
        }

        let origin = var("FRONTEND_ORIGIN").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string());
        let frontend_origin =
            HeaderValue::from_str(&origin).map_err(|err| ConfigError::InvalidValue {
                key: "FRONTEND_ORIGIN",
                value: origin.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            database,
            frontend_origin,
            log_level: var("PORTFOLIO_LOG_LEVEL")
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var("PORTFOLIO_LOG_DIR"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logs the effective configuration; call once logging is up.
    pub fn log_summary(&self) {
        info!(
            "event=config_loaded module=server status=ok address={} database={} origin={:?}",
            self.bind_address(),
            self.database,
            self.frontend_origin
        );
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match value {
        Some(value) => value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            reason: err.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
