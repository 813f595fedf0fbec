//! SQLite-backed `KeyValueStore`
//!
//! One row per key in `kv_store`. Blocking rusqlite work runs on the tokio
//! blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use shiftline_core::KeyValueStore;
use shiftline_domain::{Result as DomainResult, ShiftlineError};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, StoreManager};
use crate::errors::InfraError;

pub struct SqliteKeyValueStore {
    db: Arc<StoreManager>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Arc<StoreManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<String>> {
            let conn = db.get_connection()?;
            conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![&key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![&key, &value, Utc::now().timestamp_millis()],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![&key])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_all_keys(&self) -> DomainResult<Vec<String>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<String>> {
            let conn = db.get_connection()?;
            let mut stmt =
                conn.prepare("SELECT key FROM kv_store ORDER BY key").map_err(map_sql_error)?;
            let keys = stmt
                .query_map([], |row| row.get(0))
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<String>>>()
                .map_err(map_sql_error)?;
            Ok(keys)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove_many(&self, keys: &[String]) -> DomainResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let db = Arc::clone(&self.db);
        let keys = keys.to_vec();

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            {
                let mut stmt =
                    tx.prepare("DELETE FROM kv_store WHERE key = ?1").map_err(map_sql_error)?;
                for key in &keys {
                    stmt.execute(params![key]).map_err(map_sql_error)?;
                }
            }
            tx.commit().map_err(map_sql_error)?;
            debug!(removed = keys.len(), "removed keys in one transaction");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_join_error(err: task::JoinError) -> ShiftlineError {
    InfraError::from(err).into()
}
