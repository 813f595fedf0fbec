//! Backend session history

use std::sync::Arc;

use shiftline_domain::{Result, SessionHistoryEntry, SessionHistorySummary, ShiftlineError};
use tracing::info;

use super::seconds_to_hours;
use crate::timeline::ports::ReportBackend;
use crate::timeline::unwrap_envelope;

pub struct SessionHistoryService {
    backend: Arc<dyn ReportBackend>,
}

impl SessionHistoryService {
    pub fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self { backend }
    }

    /// Sessions of the last `days` days with their totals.
    ///
    /// # Errors
    /// Returns `ShiftlineError::InvalidInput` when `days` is 0 and
    /// `ShiftlineError::Remote` for backend failures.
    pub async fn recent(&self, days: u32) -> Result<SessionHistorySummary> {
        if days == 0 {
            return Err(ShiftlineError::InvalidInput("days must be at least 1".into()));
        }

        let envelope = self.backend.get_session_history(days).await?;
        let sessions = unwrap_envelope(envelope, "session history")?;
        let summary = summarize_sessions(days, sessions);

        info!(days, sessions = summary.session_count, "session history fetched");
        Ok(summary)
    }
}

pub fn summarize_sessions(days: u32, sessions: Vec<SessionHistoryEntry>) -> SessionHistorySummary {
    let total_seconds = sessions.iter().map(|session| session.total_seconds.max(0)).sum();
    let total_loads = sessions.iter().map(|session| session.load_count).sum();

    SessionHistorySummary {
        days,
        session_count: sessions.len(),
        total_hours: seconds_to_hours(total_seconds),
        total_loads,
        sessions,
    }
}
