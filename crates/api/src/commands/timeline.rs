//! Shift timeline commands

use std::time::Instant;

use chrono::Timelike;
use shiftline_domain::{Result, ShiftType, TimelineLayout};
use tracing::info;

use crate::context::SessionContext;
use crate::utils::logging::{finish, finish_ok};

/// Timeline of the operator's current shift from the local ledger,
/// including the running activity.
///
/// Without an explicit `shift_type` the shift is chosen from the current
/// hour.
pub async fn shift_timeline(ctx: &SessionContext, shift_type: Option<ShiftType>) -> TimelineLayout {
    let command_name = "timeline::shift_timeline";
    let start = Instant::now();

    let shift_type = shift_type.unwrap_or_else(|| current_shift(ctx));
    info!(command = command_name, shift = %shift_type, "Building shift timeline");

    let layout = ctx
        .timeline
        .local_layout(&ctx.operator_id, shift_type, ctx.machine.open_interval())
        .await;

    finish_ok(command_name, start, layout)
}

/// Timeline of a session as recorded by the report backend.
///
/// # Errors
/// Returns `ShiftlineError::InvalidInput` for a blank session number and
/// `ShiftlineError::Remote` when the backend fails or rejects the request.
pub async fn session_gantt(
    ctx: &SessionContext,
    session_number: &str,
    shift_type: Option<ShiftType>,
) -> Result<TimelineLayout> {
    let command_name = "timeline::session_gantt";
    let start = Instant::now();

    let shift_type = shift_type.unwrap_or_else(|| current_shift(ctx));
    info!(command = command_name, shift = %shift_type, "Fetching session timeline");

    let result = ctx.timeline.remote_layout(session_number, shift_type).await;
    finish(command_name, start, result)
}

fn current_shift(ctx: &SessionContext) -> ShiftType {
    ShiftType::for_hour(ctx.clock.now().hour())
}
