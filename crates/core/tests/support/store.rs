//! In-memory `KeyValueStore` mock with failure injection

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shiftline_core::KeyValueStore;
use shiftline_domain::{Result as DomainResult, ShiftlineError};

#[derive(Default)]
pub struct MockKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

impl MockKeyValueStore {
    pub fn seed(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// `get` calls so far, failed ones included.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> DomainResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ShiftlineError::Persistence("simulated read failure".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ShiftlineError::Persistence("simulated write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.check_write()?;
        // Yield so concurrent appends get a chance to interleave.
        tokio::task::yield_now().await;
        self.entries.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.check_write()?;
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn list_all_keys(&self) -> DomainResult<Vec<String>> {
        self.check_read()?;
        Ok(self.keys())
    }

    async fn remove_many(&self, keys: &[String]) -> DomainResult<()> {
        self.check_write()?;
        let mut entries = self.entries.lock();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}
