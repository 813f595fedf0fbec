//! Canned `ReportBackend` responses

use async_trait::async_trait;
use parking_lot::Mutex;
use shiftline_core::ReportBackend;
use shiftline_domain::{
    BackendEnvelope, GanttInterval, Result as DomainResult, SessionHistoryEntry,
};

pub struct StubReportBackend {
    gantt: Mutex<DomainResult<BackendEnvelope<Vec<GanttInterval>>>>,
    history: Mutex<DomainResult<BackendEnvelope<Vec<SessionHistoryEntry>>>>,
    requested_sessions: Mutex<Vec<String>>,
}

impl Default for StubReportBackend {
    fn default() -> Self {
        Self {
            gantt: Mutex::new(Ok(BackendEnvelope::ok(Vec::new()))),
            history: Mutex::new(Ok(BackendEnvelope::ok(Vec::new()))),
            requested_sessions: Mutex::new(Vec::new()),
        }
    }
}

impl StubReportBackend {
    pub fn with_gantt(self, response: DomainResult<BackendEnvelope<Vec<GanttInterval>>>) -> Self {
        *self.gantt.lock() = response;
        self
    }

    pub fn with_history(
        self,
        response: DomainResult<BackendEnvelope<Vec<SessionHistoryEntry>>>,
    ) -> Self {
        *self.history.lock() = response;
        self
    }

    pub fn requested_sessions(&self) -> Vec<String> {
        self.requested_sessions.lock().clone()
    }
}

#[async_trait]
impl ReportBackend for StubReportBackend {
    async fn get_gantt_data(
        &self,
        session_number: &str,
    ) -> DomainResult<BackendEnvelope<Vec<GanttInterval>>> {
        self.requested_sessions.lock().push(session_number.to_string());
        self.gantt.lock().clone()
    }

    async fn get_session_history(
        &self,
        _days: u32,
    ) -> DomainResult<BackendEnvelope<Vec<SessionHistoryEntry>>> {
        self.history.lock().clone()
    }
}
