//! Key-value stores backing the history ledger

pub mod manager;
pub mod memory_store;
pub mod sqlite_store;

pub use manager::StoreManager;
pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;
