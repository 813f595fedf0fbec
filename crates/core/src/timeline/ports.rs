//! Port interface for the session/report backend
//!
//! Transport details stay in infrastructure. Implementations map transport
//! and HTTP status failures to `ShiftlineError::Remote`; a well-formed
//! `success: false` envelope is returned as-is and interpreted by the
//! services.

use async_trait::async_trait;
use shiftline_domain::{BackendEnvelope, GanttInterval, Result, SessionHistoryEntry};

#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Intervals of one session, with category metadata.
    async fn get_gantt_data(
        &self,
        session_number: &str,
    ) -> Result<BackendEnvelope<Vec<GanttInterval>>>;

    /// Sessions of the last `days` days.
    async fn get_session_history(
        &self,
        days: u32,
    ) -> Result<BackendEnvelope<Vec<SessionHistoryEntry>>>;
}
