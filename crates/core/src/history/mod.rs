//! Activity history ledger
//!
//! Completed activity intervals are stored per operator and calendar day,
//! never per session. Each operator-day is one JSON list under
//! `activity_history_{YYYY-MM-DD}_{operatorId}`, most recent first and
//! capped in length.

pub mod key;
pub mod ledger;
pub mod ports;
pub mod stats;

pub use key::HistoryKey;
pub use ledger::{ActivityHistoryLedger, AppendOutcome};
pub use ports::KeyValueStore;
pub use stats::compute_stats;
