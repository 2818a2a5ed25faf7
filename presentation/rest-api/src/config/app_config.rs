use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use poem::middleware::Cors;
use thiserror::Error;

use super::{cors_config, database_config::StorageConfig, server_config::ServerConfig};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("config.unknown_storage_backend: {0}")]
    UnknownStorageBackend(String),
    #[error("config.missing_variable: {0}")]
    MissingVariable(&'static str),
}

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub storage: StorageConfig,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            storage: StorageConfig::from_env()?,
            request_timeout: Duration::from_secs(parse_or_default(
                "REQUEST_TIMEOUT_SECS",
                env::var("REQUEST_TIMEOUT_SECS").ok(),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        })
    }
}

/// Parses an optional raw environment value, falling back to `default`
/// (with a warning) when it is present but malformed.
pub fn parse_or_default<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, %default, "invalid value, using default");
            default
        }),
    }
}
