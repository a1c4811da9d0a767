//! Runtime configuration read from the environment (and `.env`, when present).

use crate::db::ConnectionPolicy;
use crate::error::AppError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: &str = "3306";
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_DB_PASSWORD: &str = "password";
const DEFAULT_DB_NAME: &str = "Donation";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub policy: ConnectionPolicy,
    pub backend: StoreBackend,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, AppError> {
        let get = |key: &str, default: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        let database_url = match vars.get("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                get("DB_USER", DEFAULT_DB_USER),
                get("DB_PASSWORD", DEFAULT_DB_PASSWORD),
                get("DB_HOST", DEFAULT_DB_HOST),
                get("DB_PORT", DEFAULT_DB_PORT),
                get("DB_NAME", DEFAULT_DB_NAME),
            ),
        };

        let policy = get("DB_POLICY", "per-operation")
            .parse::<ConnectionPolicy>()
            .map_err(AppError::Config)?;
        let backend = get("STORE_BACKEND", "mysql")
            .parse::<StoreBackend>()
            .map_err(AppError::Config)?;
        let bind_addr = get("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("invalid BIND_ADDR: {}", e)))?;

        Ok(Self {
            database_url,
            policy,
            backend,
            bind_addr,
        })
    }
}
