//! Payloads exchanged with the session/report backend

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::activity::SourceTab;

/// `{success, data, message}` response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> BackendEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, data: None, message: Some(message.into()) }
    }
}

/// One interval of a session as reported by the backend Gantt endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttInterval {
    pub activity_name: String,
    #[serde(default)]
    pub activity_code: String,
    #[serde(alias = "sourceTab")]
    pub category: SourceTab,
    pub start_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub total_seconds: Option<i64>,
}

/// One past session from the backend history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistoryEntry {
    pub session_number: String,
    pub operator_id: String,
    #[serde(default)]
    pub unit_id: Option<String>,
    pub login_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub logout_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub total_seconds: i64,
    #[serde(default)]
    pub load_count: u32,
}
