//! In-process `KeyValueStore` for tests, demos and ephemeral sessions

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shiftline_core::KeyValueStore;
use shiftline_domain::Result as DomainResult;

/// Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn list_all_keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn remove_many(&self, keys: &[String]) -> DomainResult<()> {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}
