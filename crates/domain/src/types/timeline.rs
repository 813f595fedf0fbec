//! Shift timeline ("Gantt") view models
//!
//! These are derived structures; nothing here is persisted.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::activity::{ActivityRecord, SourceTab};
use super::remote::GanttInterval;
use super::shift::ShiftWindow;

/// One interval to lay out. `end_time: None` marks the open interval of the
/// running activity; the layout uses "now" as its provisional end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInterval {
    pub activity_name: String,
    pub activity_code: String,
    pub category: SourceTab,
    pub start_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    /// Recorded duration. Derived from the endpoints when absent.
    #[serde(default)]
    pub total_seconds: Option<i64>,
}

impl TimelineInterval {
    pub fn is_ongoing(&self) -> bool {
        self.end_time.is_none()
    }
}

impl From<&ActivityRecord> for TimelineInterval {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            activity_name: record.activity_name.clone(),
            activity_code: record.activity_code.clone(),
            category: record.source_tab,
            start_time: record.start_time,
            end_time: Some(record.end_time),
            total_seconds: Some(record.total_seconds),
        }
    }
}

impl From<GanttInterval> for TimelineInterval {
    fn from(interval: GanttInterval) -> Self {
        Self {
            activity_name: interval.activity_name,
            activity_code: interval.activity_code,
            category: interval.category,
            start_time: interval.start_time,
            end_time: interval.end_time,
            total_seconds: interval.total_seconds,
        }
    }
}

/// Hour marker on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLabel {
    pub hour: u32,
    /// `HH:00`
    pub label: String,
    /// Percentage from the left edge of the shift window.
    pub position: f64,
}

/// A positioned bar on the shift timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub activity_name: String,
    pub activity_code: String,
    pub category: SourceTab,
    pub color: String,
    /// In `[0, 100]`.
    pub left_percent: f64,
    /// In `[0, 100 - left_percent]`, at least 1 whenever that fits.
    pub width_percent: f64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub total_seconds: i64,
    pub ongoing: bool,
}

/// Per-category totals for the legend under the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: SourceTab,
    pub label: String,
    pub color: String,
    pub count: usize,
    pub total_seconds: i64,
    /// Rounded independently per category; the set may sum to 99 or 101.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub shift: ShiftWindow,
    pub time_labels: Vec<TimeLabel>,
    pub entries: Vec<TimelineEntry>,
    pub category_summary: Vec<CategorySummary>,
    pub total_seconds: i64,
}
