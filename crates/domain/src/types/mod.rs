//! Domain types and models

pub mod activity;
pub mod remote;
pub mod shift;
pub mod stats;
pub mod timeline;

pub use activity::{
    ActivityRecord, ActivityState, GlobalActivityState, RunningActivity, SourceTab,
};
pub use remote::{BackendEnvelope, GanttInterval, SessionHistoryEntry};
pub use shift::{ShiftType, ShiftWindow};
pub use stats::{
    CategoryStats, HistoryStats, SessionHistorySummary, SessionMetadata, SessionReport,
};
pub use timeline::{CategorySummary, TimeLabel, TimelineEntry, TimelineInterval, TimelineLayout};
