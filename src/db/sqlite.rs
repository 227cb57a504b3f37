//! Durable key-value store on a single SQLite table.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::KeyValueStore;
use crate::errors::AppError;

/// SQLite-backed store. Every key lives in one `kv` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and run migrations.
    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;
        tracing::info!("Opened SQLite store at {:?}", db_path);

        Ok(Self { pool })
    }
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("INSERT INTO kv (key, value) VALUES (?, ?) ON CONFLICT(key) DO NOTHING")
                .bind(key)
                .bind(value)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn incr(&self, key: &str) -> Result<i64, AppError> {
        // CAST would silently turn garbage into 0.
        let existing = self.get(key).await?;
        if let Some(raw) = existing {
            if raw.parse::<i64>().is_err() {
                return Err(AppError::Store(format!(
                    "value at '{}' is not an integer",
                    key
                )));
            }
        }

        // Single upsert: concurrent callers never observe the same value.
        let row = sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES (?, '1')
            ON CONFLICT(key) DO UPDATE SET value = CAST(CAST(value AS INTEGER) + 1 AS TEXT)
            RETURNING CAST(value AS INTEGER) AS counter
            "#,
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("counter"))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT key FROM kv WHERE substr(key, 1, ?) = ? ORDER BY key")
            .bind(prefix.chars().count() as i64)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.get("key")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn open_temp() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::open(&temp_dir.path().join("kv.sqlite"))
            .await
            .expect("Failed to open store");
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_set_overwrite() {
        let (store, _dir) = open_temp().await;
        assert_eq!(store.get("board:1").await.unwrap(), None);
        store.set("board:1", "Cats").await.unwrap();
        store.set("board:1", "Dogs").await.unwrap();
        assert_eq!(store.get("board:1").await.unwrap().as_deref(), Some("Dogs"));
    }

    #[tokio::test]
    async fn test_set_if_absent() {
        let (store, _dir) = open_temp().await;
        assert!(store.set_if_absent("name:board:Cats", "1").await.unwrap());
        assert!(!store.set_if_absent("name:board:Cats", "2").await.unwrap());
        assert_eq!(
            store.get("name:board:Cats").await.unwrap().as_deref(),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_incr() {
        let (store, _dir) = open_temp().await;
        assert_eq!(store.incr("last-board-id").await.unwrap(), 1);
        assert_eq!(store.incr("last-board-id").await.unwrap(), 2);
        assert_eq!(
            store.get("last-board-id").await.unwrap().as_deref(),
            Some("2")
        );

        store.set("oops", "not a number").await.unwrap();
        assert!(matches!(store.incr("oops").await, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_concurrent_incr_never_repeats() {
        let (store, _dir) = open_temp().await;
        let store = Arc::new(store);
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.incr("n").await.unwrap() })
            })
            .collect();

        let mut values = HashSet::new();
        for handle in handles {
            assert!(values.insert(handle.await.unwrap()));
        }
        assert_eq!(values, (1..=32).collect::<HashSet<i64>>());
    }

    #[tokio::test]
    async fn test_prefix_scan_is_literal() {
        let (store, _dir) = open_temp().await;
        for key in ["board:1", "board:2", "creator:board:1", "board%", "board_x"] {
            store.set(key, "v").await.unwrap();
        }

        let keys = store.keys_with_prefix("board:").await.unwrap();
        assert_eq!(keys, vec!["board:1".to_string(), "board:2".to_string()]);

        let keys = store.keys_with_prefix("board%").await.unwrap();
        assert_eq!(keys, vec!["board%".to_string()]);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.sqlite");
        {
            let store = SqliteStore::open(&path).await.unwrap();
            store.incr("last-board-id").await.unwrap();
            store.set("board:1", "Cats").await.unwrap();
            store.pool.close().await;
        }

        let store = SqliteStore::open(&path).await.unwrap();
        assert_eq!(store.get("board:1").await.unwrap().as_deref(), Some("Cats"));
        assert_eq!(store.incr("last-board-id").await.unwrap(), 2);
    }
}
