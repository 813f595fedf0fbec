//! Timeline service - feeds the layout engine from the ledger or the backend

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Timelike};
use shiftline_domain::constants::SHIFT_LENGTH_HOURS;
use shiftline_domain::{
    ActivityRecord, BackendEnvelope, RemoteFailureKind, Result, ShiftType, ShiftlineError,
    TimelineInterval, TimelineLayout,
};
use tracing::{debug, info, warn};

use super::layout::layout;
use super::ports::ReportBackend;
use crate::clock::Clock;
use crate::history::ActivityHistoryLedger;

/// Unwrap a backend envelope.
///
/// `success: false` becomes a `Remote` error of kind `Rejected`, carrying
/// the backend's message when it sent one. A successful envelope without
/// `data` yields `T::default()`.
///
/// # Errors
/// Returns `ShiftlineError::Remote` when the backend rejected the request.
pub fn unwrap_envelope<T: Default>(envelope: BackendEnvelope<T>, what: &str) -> Result<T> {
    if !envelope.success {
        let message = envelope
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("{what} request was rejected"));
        return Err(ShiftlineError::remote(RemoteFailureKind::Rejected, message));
    }

    Ok(envelope.data.unwrap_or_default())
}

pub struct TimelineService {
    backend: Arc<dyn ReportBackend>,
    ledger: Arc<ActivityHistoryLedger>,
    clock: Arc<dyn Clock>,
}

impl TimelineService {
    pub fn new(
        backend: Arc<dyn ReportBackend>,
        ledger: Arc<ActivityHistoryLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { backend, ledger, clock }
    }

    /// Lay out the operator's current shift from the local ledger.
    ///
    /// `open` is the running activity, if any; it is drawn up to "now". A
    /// night shift viewed before noon also reads yesterday's list, since the
    /// shift began the previous evening.
    pub async fn local_layout(
        &self,
        operator_id: &str,
        shift_type: ShiftType,
        open: Option<TimelineInterval>,
    ) -> TimelineLayout {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut records = self.ledger.load(operator_id, Some(today)).await;
        if shift_type == ShiftType::Night && now.hour() < 12 {
            if let Some(yesterday) = today.pred_opt() {
                records.extend(self.ledger.load(operator_id, Some(yesterday)).await);
            }
        }

        let mut intervals: Vec<TimelineInterval> = match shift_bounds(shift_type, now) {
            Some((start, end)) => records
                .iter()
                .filter(|record| overlaps(record, start, end))
                .map(TimelineInterval::from)
                .collect(),
            None => records.iter().map(TimelineInterval::from).collect(),
        };
        intervals.extend(open);

        debug!(operator_id, shift = %shift_type, intervals = intervals.len(), "local timeline");
        layout(shift_type, &intervals, now)
    }

    /// Fetch a session's intervals from the backend and lay them out.
    ///
    /// # Errors
    /// Returns `ShiftlineError::InvalidInput` for a blank session number and
    /// `ShiftlineError::Remote` for any backend failure.
    pub async fn remote_layout(
        &self,
        session_number: &str,
        shift_type: ShiftType,
    ) -> Result<TimelineLayout> {
        let session_number = session_number.trim();
        if session_number.is_empty() {
            return Err(ShiftlineError::InvalidInput("session number is required".into()));
        }

        let envelope = self.backend.get_gantt_data(session_number).await.map_err(|err| {
            warn!(session_number, error = %err, "gantt data request failed");
            err
        })?;
        let intervals: Vec<TimelineInterval> = unwrap_envelope(envelope, "gantt data")?
            .into_iter()
            .map(TimelineInterval::from)
            .collect();

        info!(session_number, shift = %shift_type, intervals = intervals.len(), "session timeline");
        Ok(layout(shift_type, &intervals, self.clock.now()))
    }
}

/// Absolute bounds of the shift instance containing (or, for a day shift,
/// dated) `now`.
fn shift_bounds(
    shift_type: ShiftType,
    now: DateTime<FixedOffset>,
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let window = shift_type.window();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    let mut start = midnight + Duration::hours(i64::from(window.start_hour));
    if shift_type == ShiftType::Night && now.hour() < 12 {
        start -= Duration::days(1);
    }
    let end = start + Duration::hours(i64::from(SHIFT_LENGTH_HOURS));

    let offset = now.offset();
    Some((
        start.and_local_timezone(*offset).single()?,
        end.and_local_timezone(*offset).single()?,
    ))
}

fn overlaps(
    record: &ActivityRecord,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> bool {
    record.start_time < end && record.end_time > start
}
