//! Configuration module for the boards service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Which key-value store backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(AppError::Config(format!(
                "BOARDS_STORE must be 'sqlite' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value store backend
    pub store: StoreBackend,
    /// Path to the SQLite file (sqlite backend only)
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Reject comments longer than 255 characters
    pub enforce_comment_length: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let store = env::var("BOARDS_STORE")
            .map(|v| StoreBackend::parse(&v))
            .unwrap_or(Ok(StoreBackend::Sqlite))?;

        let db_path = env::var("BOARDS_DB_PATH")
            .unwrap_or_else(|_| "./data/boards.sqlite".to_string())
            .into();

        let bind_addr = env::var("BOARDS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let bind_addr = bind_addr.parse().map_err(|_| {
            AppError::Config(format!("Invalid BOARDS_BIND_ADDR '{}'", bind_addr))
        })?;

        let log_level = env::var("BOARDS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = flag("BOARDS_LOG_JSON")?;
        let enforce_comment_length = flag("BOARDS_ENFORCE_COMMENT_LENGTH")?;

        Ok(Self {
            store,
            db_path,
            bind_addr,
            log_level,
            log_json,
            enforce_comment_length,
        })
    }
}

/// Boolean variable; unset means `false`.
fn flag(name: &str) -> Result<bool, AppError> {
    let Ok(raw) = env::var(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Tests in this module share the process environment.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: &[&str] = &[
        "BOARDS_STORE",
        "BOARDS_DB_PATH",
        "BOARDS_BIND_ADDR",
        "BOARDS_LOG_LEVEL",
        "BOARDS_LOG_JSON",
        "BOARDS_ENFORCE_COMMENT_LENGTH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.db_path, PathBuf::from("./data/boards.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(!config.enforce_comment_length);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("BOARDS_STORE", "Memory");
        env::set_var("BOARDS_BIND_ADDR", "0.0.0.0:8080");
        env::set_var("BOARDS_LOG_JSON", "true");
        env::set_var("BOARDS_ENFORCE_COMMENT_LENGTH", "1");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.log_json);
        assert!(config.enforce_comment_length);
    }

    #[test]
    fn test_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        clear_env();
        env::set_var("BOARDS_BIND_ADDR", "not an address");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        clear_env();
        env::set_var("BOARDS_STORE", "redis");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        clear_env();
        env::set_var("BOARDS_LOG_JSON", "maybe");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        clear_env();
    }
}
