//! Process-local store for tests and throwaway runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::errors::AppError;

/// Ordered in-memory map. Key scans come back sorted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, AppError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn incr(&self, key: &str) -> Result<i64, AppError> {
        // Read and write under one guard.
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                AppError::Store(format!("value at '{}' is not an integer", key))
            })?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| AppError::Store(format!("counter '{}' overflowed", key)))?;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
