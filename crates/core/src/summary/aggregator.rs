//! Session report aggregation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use shiftline_domain::{HistoryStats, SessionMetadata, SessionReport, SourceTab};
use tracing::info;

use super::{round_hours, seconds_to_hours};
use crate::clock::Clock;
use crate::history::ActivityHistoryLedger;

pub struct SessionSummaryAggregator {
    ledger: Arc<ActivityHistoryLedger>,
    clock: Arc<dyn Clock>,
}

impl SessionSummaryAggregator {
    pub fn new(ledger: Arc<ActivityHistoryLedger>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }

    /// Report for the session described by `metadata`, over today's ledger.
    pub async fn report(&self, metadata: &SessionMetadata) -> SessionReport {
        let stats = self.ledger.stats(&metadata.operator_id).await;
        let report = build_session_report(&stats, metadata, self.clock.now());

        info!(
            operator_id = %report.operator_id,
            unit_id = %report.unit_id,
            work_hours = report.work_hours,
            load_count = report.load_count,
            "session report generated"
        );
        report
    }
}

/// Combine ledger statistics with session metadata.
///
/// Productivity is loads per work hour and is 0 without recorded work.
/// Hour-meter hours are only reported when both readings are present and
/// the end reading is not below the start reading.
pub fn build_session_report(
    stats: &HistoryStats,
    metadata: &SessionMetadata,
    now: DateTime<FixedOffset>,
) -> SessionReport {
    let work_seconds = stats.category(SourceTab::Work).duration.max(0);
    let work_hours = seconds_to_hours(work_seconds);

    let productivity = if work_seconds > 0 {
        round_hours(f64::from(metadata.load_count) / (work_seconds as f64 / 3600.0))
    } else {
        0.0
    };

    let utilization_percent = if stats.total_duration > 0 {
        (work_seconds as f64 / stats.total_duration as f64 * 100.0).round() as u32
    } else {
        0
    };

    let hm_hours = match (metadata.hm_start, metadata.hm_end) {
        (Some(start), Some(end)) if end >= start => Some(round_hours(end - start)),
        _ => None,
    };

    let activity_counts: BTreeMap<SourceTab, usize> =
        stats.by_category.iter().map(|(tab, category)| (*tab, category.count)).collect();

    SessionReport {
        operator_id: metadata.operator_id.clone(),
        unit_id: metadata.unit_id.clone(),
        session_number: metadata.session_number.clone(),
        login_time: metadata.login_time,
        generated_at: now,
        session_hours: seconds_to_hours((now - metadata.login_time).num_seconds()),
        work_hours,
        hm_hours,
        load_count: metadata.load_count,
        productivity,
        utilization_percent,
        total_activities: stats.total_activities,
        activity_counts,
        most_frequent_activity: stats.most_frequent_activity.clone(),
    }
}
