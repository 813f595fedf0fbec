#![allow(dead_code)]

use std::sync::Arc;

use shiftline_infra::storage::{SqliteKeyValueStore, StoreManager};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<StoreManager>,
    pub store: Arc<SqliteKeyValueStore>,
    temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let manager = Arc::new(open(&temp_dir));
        let store = Arc::new(SqliteKeyValueStore::new(manager.clone()));
        Self { manager, store, temp_dir }
    }

    /// A second manager over the same file, as after a restart.
    pub fn reopen(&self) -> SqliteKeyValueStore {
        SqliteKeyValueStore::new(Arc::new(open(&self.temp_dir)))
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn open(temp_dir: &TempDir) -> StoreManager {
    let manager =
        StoreManager::new(temp_dir.path().join("shiftline.db"), 4).expect("store manager created");
    manager.run_migrations().expect("migrations run");
    manager
}
