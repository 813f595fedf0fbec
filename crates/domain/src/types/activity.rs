//! Activity categories, closed activity records and the live activity state

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MIN_RECORD_SECONDS;
use crate::errors::{Result, ShiftlineError};

/// Mutually exclusive activity category (the tab an activity was picked from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTab {
    Work,
    Delay,
    Idle,
    #[serde(alias = "maintenance")]
    Mt,
}

impl SourceTab {
    /// Every category, in display order.
    pub const ALL: [SourceTab; 4] = [Self::Work, Self::Delay, Self::Idle, Self::Mt];

    /// Human label for legends and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Delay => "Delay",
            Self::Idle => "Idle",
            Self::Mt => "Maintenance",
        }
    }

    /// Bar color used by the shift timeline.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Work => "#4CAF50",
            Self::Delay => "#FF9800",
            Self::Idle => "#9E9E9E",
            Self::Mt => "#2196F3",
        }
    }
}

crate::impl_domain_enum_conversions!(SourceTab {
    Work => "work",
    Delay => "delay",
    Idle => "idle",
    Mt => "mt" | "maintenance",
});

/// A completed activity interval. Immutable once closed.
///
/// Serialized with camelCase field names; this is the storage format of the
/// per operator-day history lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub operator_id: String,
    pub activity_name: String,
    pub activity_code: String,
    pub source_tab: SourceTab,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub total_seconds: i64,
    /// When the record was appended to the ledger.
    pub timestamp: DateTime<FixedOffset>,
}

impl ActivityRecord {
    /// Close a running activity at `end_time`.
    ///
    /// The record is not validated here; an interval closed at or before its
    /// start is caught by [`ActivityRecord::validate`].
    pub fn close(
        operator_id: impl Into<String>,
        running: &RunningActivity,
        end_time: DateTime<FixedOffset>,
        recorded_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            operator_id: operator_id.into(),
            activity_name: running.activity_name.clone(),
            activity_code: running.activity_code.clone(),
            source_tab: running.source_tab,
            start_time: running.start_time,
            end_time,
            total_seconds: rounded_seconds(running.start_time, end_time),
            timestamp: recorded_at,
        }
    }

    /// Check the invariants a record must satisfy before it is persisted.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Validation` naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.activity_name.trim().is_empty() {
            return Err(ShiftlineError::Validation("missing activityName".into()));
        }
        if self.activity_code.trim().is_empty() {
            return Err(ShiftlineError::Validation("missing activityCode".into()));
        }
        if self.end_time <= self.start_time {
            return Err(ShiftlineError::Validation(format!(
                "endTime {} is not after startTime {}",
                self.end_time.to_rfc3339(),
                self.start_time.to_rfc3339()
            )));
        }
        if self.total_seconds < MIN_RECORD_SECONDS {
            return Err(ShiftlineError::Validation(format!(
                "totalSeconds {} is below the {MIN_RECORD_SECONDS}s minimum",
                self.total_seconds
            )));
        }
        Ok(())
    }
}

/// `round((end - start) / 1000)` over milliseconds.
pub fn rounded_seconds(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> i64 {
    let millis = end.signed_duration_since(start).num_milliseconds();
    (millis as f64 / 1000.0).round() as i64
}

/// The activity currently running for an operator (the open interval).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningActivity {
    pub activity_name: String,
    pub activity_code: String,
    pub source_tab: SourceTab,
    pub start_time: DateTime<FixedOffset>,
}

impl RunningActivity {
    /// Re-selection check: same code from the same tab.
    pub fn is_same(&self, activity_code: &str, source_tab: SourceTab) -> bool {
        self.activity_code == activity_code && self.source_tab == source_tab
    }

    /// Whole seconds since the activity started, never negative.
    pub fn elapsed_seconds(&self, now: DateTime<FixedOffset>) -> i64 {
        now.signed_duration_since(self.start_time).num_seconds().max(0)
    }
}

/// State of the single-active-activity machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActivityState {
    #[default]
    Idle,
    Running(RunningActivity),
}

impl ActivityState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    pub fn running(&self) -> Option<&RunningActivity> {
        match self {
            Self::Running(activity) => Some(activity),
            Self::Idle => None,
        }
    }
}

/// Read-only view of the live activity, as handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalActivityState {
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tab: Option<SourceTab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<FixedOffset>>,
    pub elapsed_seconds: i64,
    /// `HH:MM:SS`
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 3, 2, hour, minute, second).unwrap()
    }

    fn running(start: DateTime<FixedOffset>) -> RunningActivity {
        RunningActivity {
            activity_name: "Relocate".into(),
            activity_code: "004".into(),
            source_tab: SourceTab::Work,
            start_time: start,
        }
    }

    #[test]
    fn close_computes_rounded_seconds() {
        let start = at(8, 0, 0);
        let end = start + chrono::Duration::milliseconds(90_600);
        let record = ActivityRecord::close("op-1", &running(start), end, end);

        assert_eq!(record.total_seconds, 91);
        assert_eq!(record.operator_id, "op-1");
        assert_eq!(record.source_tab, SourceTab::Work);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_interval() {
        let start = at(8, 0, 0);
        let record = ActivityRecord::close("op-1", &running(start), at(7, 59, 0), start);

        assert!(matches!(record.validate(), Err(ShiftlineError::Validation(_))));
    }

    #[test]
    fn validate_rejects_sub_second_interval() {
        let start = at(8, 0, 0);
        let end = start + chrono::Duration::milliseconds(400);
        let record = ActivityRecord::close("op-1", &running(start), end, end);

        assert_eq!(record.total_seconds, 0);
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("totalSeconds"));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let start = at(8, 0, 0);
        let mut record = ActivityRecord::close("op-1", &running(start), at(9, 0, 0), start);
        record.activity_code = "  ".into();

        assert!(record.validate().unwrap_err().to_string().contains("activityCode"));
    }

    #[test]
    fn record_uses_camel_case_storage_format() {
        let start = at(8, 0, 0);
        let record = ActivityRecord::close("op-1", &running(start), at(9, 0, 0), at(9, 0, 0));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["operatorId"], "op-1");
        assert_eq!(json["sourceTab"], "work");
        assert_eq!(json["totalSeconds"], 3600);
        assert_eq!(json["startTime"], "2026-03-02T08:00:00+00:00");
    }

    #[test]
    fn source_tab_accepts_maintenance_alias() {
        let tab: SourceTab = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(tab, SourceTab::Mt);
        assert_eq!("MT".parse::<SourceTab>().unwrap(), SourceTab::Mt);
        assert_eq!(SourceTab::Mt.to_string(), "mt");
        assert_eq!(SourceTab::Mt.label(), "Maintenance");
    }

    #[test]
    fn running_activity_elapsed_is_never_negative() {
        let activity = running(at(8, 0, 0));
        assert_eq!(activity.elapsed_seconds(at(8, 1, 5)), 65);
        assert_eq!(activity.elapsed_seconds(at(7, 0, 0)), 0);
    }
}
