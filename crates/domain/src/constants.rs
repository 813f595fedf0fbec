//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// History ledger
pub const HISTORY_KEY_PREFIX: &str = "activity_history_";
pub const HISTORY_KEY_DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_HISTORY_ENTRIES: usize = 50;
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const MIN_RECORD_SECONDS: i64 = 1;

// Shift windows
pub const SHIFT_LENGTH_HOURS: u32 = 12;
pub const DAY_SHIFT_START_HOUR: u32 = 6;
pub const NIGHT_SHIFT_START_HOUR: u32 = 18;

// Timeline layout
pub const MIN_ENTRY_WIDTH_PERCENT: f64 = 1.0;
pub const FULL_WIDTH_PERCENT: f64 = 100.0;

// Clock
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

// Report backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 15;
