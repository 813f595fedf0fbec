//! Statistics and report types
//!
//! This module centralizes the aggregate structs derived from the history
//! ledger:
//! - Per operator-day ledger statistics
//! - Session metadata and the session report built from it
//! - Summary of the backend session history

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::activity::SourceTab;
use super::remote::SessionHistoryEntry;

/* -------------------------------------------------------------------------- */
/* Ledger Statistics */
/* -------------------------------------------------------------------------- */

/// Count and summed duration for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    /// Seconds
    pub duration: i64,
}

/// Statistics over one operator-day of history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_activities: usize,
    /// Summed `totalSeconds` of every record.
    pub total_duration: i64,
    pub by_category: BTreeMap<SourceTab, CategoryStats>,
    /// Most frequent `activityCode`, `None` when there is no history.
    pub most_frequent_activity: Option<String>,
}

impl HistoryStats {
    pub fn category(&self, tab: SourceTab) -> CategoryStats {
        self.by_category.get(&tab).copied().unwrap_or_default()
    }
}

/* -------------------------------------------------------------------------- */
/* Session Report */
/* -------------------------------------------------------------------------- */

/// Metadata captured at login and during the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    #[serde(default)]
    pub session_number: Option<String>,
    pub operator_id: String,
    pub unit_id: String,
    pub login_time: DateTime<FixedOffset>,
    /// Hour-meter reading at login.
    #[serde(default)]
    pub hm_start: Option<f64>,
    /// Hour-meter reading at logout (or latest reading).
    #[serde(default)]
    pub hm_end: Option<f64>,
    #[serde(default)]
    pub load_count: u32,
}

/// Read-only session report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub operator_id: String,
    pub unit_id: String,
    pub session_number: Option<String>,
    pub login_time: DateTime<FixedOffset>,
    pub generated_at: DateTime<FixedOffset>,
    /// Hours since login.
    pub session_hours: f64,
    /// Hours recorded under the `work` category.
    pub work_hours: f64,
    /// Hour-meter delta, when both readings are known and consistent.
    pub hm_hours: Option<f64>,
    pub load_count: u32,
    /// Loads per work hour.
    pub productivity: f64,
    /// Work share of all tracked time, in percent.
    pub utilization_percent: u32,
    pub total_activities: usize,
    pub activity_counts: BTreeMap<SourceTab, usize>,
    pub most_frequent_activity: Option<String>,
}

/* -------------------------------------------------------------------------- */
/* Session History */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistorySummary {
    pub days: u32,
    pub session_count: usize,
    pub total_hours: f64,
    pub total_loads: u32,
    pub sessions: Vec<SessionHistoryEntry>,
}
