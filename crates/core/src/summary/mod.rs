//! Session summaries
//!
//! Read-only aggregates: the report for the running session, built from the
//! ledger plus session metadata, and the backend session history.

pub mod aggregator;
pub mod history;

pub use aggregator::{build_session_report, SessionSummaryAggregator};
pub use history::{summarize_sessions, SessionHistoryService};

/// Round an hour figure to two decimals for display.
pub(crate) fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

pub(crate) fn seconds_to_hours(seconds: i64) -> f64 {
    round_hours(seconds.max(0) as f64 / 3600.0)
}
