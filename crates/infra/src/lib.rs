//! # Shiftline Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Key-value stores for the history ledger (SQLite, in-memory)
//! - The HTTP report backend client
//! - Configuration loading
//! - Logging initialisation
//!
//! ## Architecture
//! - Implements traits defined in `shiftline-core`
//! - Contains all "impure" code (I/O, network, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{HttpReportBackend, ReportClientConfig};
pub use errors::InfraError;
pub use storage::{MemoryKeyValueStore, SqliteKeyValueStore, StoreManager};
