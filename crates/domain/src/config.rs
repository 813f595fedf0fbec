//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_BACKEND_URL, DEFAULT_RETENTION_DAYS,
    DEFAULT_TICK_INTERVAL_MS, MAX_HISTORY_ENTRIES,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

/// Key-value store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    pub pool_size: u32,
}

/// History ledger policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Records kept per operator-day; older entries are dropped on append.
    pub max_entries_per_day: usize,
    pub retention_days: u32,
}

/// Report backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Clock and ticker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub tick_interval_ms: u64,
    /// Fixed site offset from UTC. `None` uses the host's local offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig { path: "shiftline.db".to_string(), pool_size: 4 },
            history: HistoryConfig::default(),
            backend: BackendConfig::default(),
            clock: ClockConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries_per_day: MAX_HISTORY_ENTRIES, retention_days: DEFAULT_RETENTION_DAYS }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: DEFAULT_BACKEND_TIMEOUT_SECS,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_interval_ms: DEFAULT_TICK_INTERVAL_MS, utc_offset_minutes: None }
    }
}
