//! Live activity commands

use std::time::Instant;

use shiftline_core::{ElapsedTick, TickerError, TransitionOutcome};
use shiftline_domain::{GlobalActivityState, Result, SourceTab};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::context::SessionContext;
use crate::utils::logging::{finish, finish_ok};

/// Start an activity from a tab, switching away from the running one.
///
/// # Errors
/// Returns `ShiftlineError::InvalidInput` for a blank name or code. A
/// failure to save the closed interval is reported in the outcome, not as
/// an error.
pub async fn start_activity(
    ctx: &SessionContext,
    activity_name: &str,
    activity_code: &str,
    source_tab: SourceTab,
) -> Result<TransitionOutcome> {
    let command_name = "tracking::start_activity";
    let start = Instant::now();

    info!(command = command_name, activity_code, %source_tab, "Starting activity");

    let result = ctx.machine.start(activity_name, activity_code, source_tab).await;
    if let Some(err) = result.as_ref().ok().and_then(TransitionOutcome::persistence_error) {
        warn!(command = command_name, error = %err, "previous activity was not saved");
    }

    finish(command_name, start, result)
}

/// Stop the running activity. Stopping while idle is a no-op.
pub async fn stop_activity(ctx: &SessionContext) -> TransitionOutcome {
    let command_name = "tracking::stop_activity";
    let start = Instant::now();

    let outcome = ctx.machine.stop().await;
    if let Some(err) = outcome.persistence_error() {
        warn!(command = command_name, error = %err, "stopped activity was not saved");
    }

    finish_ok(command_name, start, outcome)
}

pub fn current_activity(ctx: &SessionContext) -> GlobalActivityState {
    ctx.machine.current()
}

/// Subscribe to elapsed-time updates, starting the ticker on first use.
///
/// Concurrent first calls are safe: whichever loses the race to start the
/// ticker subscribes to the one already running.
///
/// # Errors
/// Returns `ShiftlineError::Internal` if the ticker reports any failure
/// other than already running.
pub fn elapsed_updates(ctx: &SessionContext) -> Result<watch::Receiver<Option<ElapsedTick>>> {
    let command_name = "tracking::elapsed_updates";
    let start = Instant::now();

    let receiver = ctx.ticker.subscribe();
    let result: Result<()> = match ctx.ticker.start() {
        Ok(()) | Err(TickerError::AlreadyRunning) => Ok(()),
        Err(err) => Err(err.into()),
    };

    finish(command_name, start, result.map(|()| receiver))
}
