//! Process configuration read from the environment at startup.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PRODUCTS_DB_PATH";
pub const DB_MAX_CONNECTIONS_VAR: &str = "PRODUCTS_DB_MAX_CONNECTIONS";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_DB_PATH: &str = "App_Data/products.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Where the SQLite file lives and how many connections to pool.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Read from process environment. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DB_PATH_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.into());

        let max_connections = match lookup(DB_MAX_CONNECTIONS_VAR) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: DB_MAX_CONNECTIONS_VAR,
                        value: raw,
                    })
                }
            },
        };

        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: BIND_ADDR_VAR,
            value: bind_raw.clone(),
        })?;

        Ok(AppConfig {
            bind_addr,
            store: StoreConfig {
                path: PathBuf::from(path),
                max_connections,
            },
        })
    }
}
