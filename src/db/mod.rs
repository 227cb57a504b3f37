//! Key-value persistence.
//!
//! The store is the only source of truth; it has no native structure, so
//! [`Repository`] encodes relations into key strings on top of it.

mod memory;
mod repository;
mod sqlite;

pub use memory::MemoryStore;
pub use repository::*;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::errors::AppError;

/// Flat key-value store consumed by the repository.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Get a value. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Set a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Set a value only when the key is absent. Returns `true` if it was written.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, AppError>;

    /// Atomically increment an integer value and return the new value.
    /// A missing key counts as zero.
    async fn incr(&self, key: &str) -> Result<i64, AppError>;

    /// All keys starting with `prefix`.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError>;
}

/// Open the store selected by the configuration.
pub async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, AppError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; boards are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite => Ok(Arc::new(SqliteStore::open(&config.db_path).await?)),
    }
}
