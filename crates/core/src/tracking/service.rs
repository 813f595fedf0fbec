//! Global activity state machine - core business logic

use std::sync::Arc;

use parking_lot::RwLock;
use shiftline_domain::{
    ActivityRecord, ActivityState, GlobalActivityState, Result, RunningActivity, ShiftlineError,
    SourceTab, TimelineInterval,
};
use tokio::sync::Mutex;
use tracing::{error, info, trace, warn};

use super::format::format_elapsed;
use super::ticker::ElapsedTick;
use crate::clock::Clock;
use crate::history::{ActivityHistoryLedger, AppendOutcome};

/// What a `start`/`stop` call did to the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// IDLE → RUNNING
    Started,
    /// RUNNING(a) → RUNNING(b); `a` was closed.
    Switched,
    /// RUNNING → IDLE
    Stopped,
    /// Re-selection of the running activity, or `stop` while idle.
    Ignored,
}

/// Fate of the interval closed by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ClosedInterval {
    /// Nothing was running, or the call was ignored.
    None,
    Recorded(ActivityRecord),
    /// Failed validation (e.g. shorter than one second) and was dropped.
    Rejected { record: ActivityRecord, reason: String },
    /// The ledger could not persist it. The live state moved on anyway.
    Lost { record: ActivityRecord, error: ShiftlineError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub kind: TransitionKind,
    pub closed: ClosedInterval,
    /// Live state after the transition.
    pub state: GlobalActivityState,
}

impl TransitionOutcome {
    /// The soft persistence failure of this transition, if any.
    pub fn persistence_error(&self) -> Option<&ShiftlineError> {
        match &self.closed {
            ClosedInterval::Lost { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn recorded(&self) -> Option<&ActivityRecord> {
        match &self.closed {
            ClosedInterval::Recorded(record) => Some(record),
            _ => None,
        }
    }
}

/// Single-active-activity state machine for one operator session.
///
/// Transitions are serialized: a `start`/`stop` issued while the previous
/// transition's ledger append is in flight waits for it. The live state is
/// swapped before the append is awaited, so ticks and reads never block on
/// storage.
pub struct ActivityStateMachine {
    operator_id: String,
    ledger: Arc<ActivityHistoryLedger>,
    clock: Arc<dyn Clock>,
    state: RwLock<ActivityState>,
    transitions: Mutex<()>,
}

impl ActivityStateMachine {
    /// Create an idle state machine for an operator session.
    pub fn new(
        operator_id: impl Into<String>,
        ledger: Arc<ActivityHistoryLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            operator_id: operator_id.into(),
            ledger,
            clock,
            state: RwLock::new(ActivityState::Idle),
            transitions: Mutex::new(()),
        }
    }

    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    /// Start an activity, closing the running one first (auto-switch).
    ///
    /// Selecting the activity that is already running is a no-op.
    ///
    /// # Errors
    /// Returns `ShiftlineError::InvalidInput` for a blank name or code; the
    /// state is untouched in that case. Ledger failures are never returned
    /// here, they are reported through [`TransitionOutcome::closed`].
    pub async fn start(
        &self,
        activity_name: &str,
        activity_code: &str,
        source_tab: SourceTab,
    ) -> Result<TransitionOutcome> {
        if activity_name.trim().is_empty() || activity_code.trim().is_empty() {
            return Err(ShiftlineError::InvalidInput(
                "activity name and code are required to start an activity".into(),
            ));
        }

        let _turn = self.transitions.lock().await;
        let now = self.clock.now();

        let previous = {
            let mut state = self.state.write();
            if state.running().is_some_and(|current| current.is_same(activity_code, source_tab)) {
                trace!(activity_code, %source_tab, "re-selected running activity");
                return Ok(self.outcome(TransitionKind::Ignored, ClosedInterval::None, &state));
            }

            let next = ActivityState::Running(RunningActivity {
                activity_name: activity_name.to_string(),
                activity_code: activity_code.to_string(),
                source_tab,
                start_time: now,
            });
            std::mem::replace(&mut *state, next)
        };

        let (kind, closed) = match previous {
            ActivityState::Running(running) => {
                (TransitionKind::Switched, self.close_interval(&running, now).await)
            }
            ActivityState::Idle => (TransitionKind::Started, ClosedInterval::None),
        };

        info!(
            operator_id = %self.operator_id,
            activity_code,
            %source_tab,
            transition = ?kind,
            "activity started"
        );
        let state = self.state.read();
        Ok(self.outcome(kind, closed, &state))
    }

    /// Stop the running activity. No-op when idle.
    pub async fn stop(&self) -> TransitionOutcome {
        let _turn = self.transitions.lock().await;
        let now = self.clock.now();

        let previous = std::mem::take(&mut *self.state.write());
        let ActivityState::Running(running) = previous else {
            trace!(operator_id = %self.operator_id, "stop while idle ignored");
            return self.outcome(TransitionKind::Ignored, ClosedInterval::None, &ActivityState::Idle);
        };

        let closed = self.close_interval(&running, now).await;
        info!(
            operator_id = %self.operator_id,
            activity_code = %running.activity_code,
            "activity stopped"
        );
        self.outcome(TransitionKind::Stopped, closed, &ActivityState::Idle)
    }

    /// Snapshot of the live state with elapsed time recomputed from the
    /// clock.
    pub fn current(&self) -> GlobalActivityState {
        let state = self.state.read();
        self.view(&state)
    }

    pub fn is_active(&self) -> bool {
        self.state.read().is_active()
    }

    /// Elapsed time of the running activity, `None` while idle.
    pub fn tick(&self) -> Option<ElapsedTick> {
        let state = self.state.read();
        let running = state.running()?;
        let elapsed_seconds = running.elapsed_seconds(self.clock.now());
        trace!(activity_code = %running.activity_code, elapsed_seconds, "tick");
        Some(ElapsedTick { elapsed_seconds, formatted: format_elapsed(elapsed_seconds) })
    }

    /// The running activity as an open timeline interval. Layout gives it a
    /// provisional end of "now"; it is never written to the ledger.
    pub fn open_interval(&self) -> Option<TimelineInterval> {
        let state = self.state.read();
        state.running().map(|running| TimelineInterval {
            activity_name: running.activity_name.clone(),
            activity_code: running.activity_code.clone(),
            category: running.source_tab,
            start_time: running.start_time,
            end_time: None,
            total_seconds: None,
        })
    }

    async fn close_interval(
        &self,
        running: &RunningActivity,
        end_time: chrono::DateTime<chrono::FixedOffset>,
    ) -> ClosedInterval {
        let record = ActivityRecord::close(&self.operator_id, running, end_time, self.clock.now());

        match self.ledger.append(&self.operator_id, record.clone()).await {
            Ok(AppendOutcome::Stored(stored)) => ClosedInterval::Recorded(stored),
            Ok(AppendOutcome::Rejected { reason }) => {
                warn!(
                    operator_id = %self.operator_id,
                    activity_code = %record.activity_code,
                    reason = %reason,
                    "closed interval dropped"
                );
                ClosedInterval::Rejected { record, reason }
            }
            Err(error) => {
                error!(
                    operator_id = %self.operator_id,
                    activity_code = %record.activity_code,
                    error = %error,
                    "closed interval lost: ledger append failed"
                );
                ClosedInterval::Lost { record, error }
            }
        }
    }

    fn outcome(
        &self,
        kind: TransitionKind,
        closed: ClosedInterval,
        state: &ActivityState,
    ) -> TransitionOutcome {
        TransitionOutcome { kind, closed, state: self.view(state) }
    }

    fn view(&self, state: &ActivityState) -> GlobalActivityState {
        match state.running() {
            Some(running) => {
                let elapsed_seconds = running.elapsed_seconds(self.clock.now());
                GlobalActivityState {
                    is_active: true,
                    activity_code: Some(running.activity_code.clone()),
                    activity_name: Some(running.activity_name.clone()),
                    source_tab: Some(running.source_tab),
                    start_time: Some(running.start_time),
                    elapsed_seconds,
                    duration: format_elapsed(elapsed_seconds),
                }
            }
            None => GlobalActivityState {
                is_active: false,
                activity_code: None,
                activity_name: None,
                source_tab: None,
                start_time: None,
                elapsed_seconds: 0,
                duration: format_elapsed(0),
            },
        }
    }
}
