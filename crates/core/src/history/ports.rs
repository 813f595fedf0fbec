//! Port interface for the key-value persistence collaborator
//!
//! The ledger only needs string keys and string (JSON) values. Storage
//! mechanics live in infrastructure implementations.

use async_trait::async_trait;
use shiftline_domain::Result;

/// Async key-value store.
///
/// Implementations report storage failures as
/// `ShiftlineError::Persistence`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently stored.
    async fn list_all_keys(&self) -> Result<Vec<String>>;

    /// Delete several keys at once.
    async fn remove_many(&self, keys: &[String]) -> Result<()>;
}
