//! Session summary commands

use std::time::Instant;

use shiftline_domain::{
    Result, SessionHistorySummary, SessionMetadata, SessionReport, ShiftlineError,
};
use tracing::info;

use crate::context::SessionContext;
use crate::utils::logging::finish;

/// Report for the current session over today's ledger.
///
/// # Errors
/// Returns `ShiftlineError::InvalidInput` if `metadata` names a different
/// operator than the session.
pub async fn session_report(
    ctx: &SessionContext,
    metadata: &SessionMetadata,
) -> Result<SessionReport> {
    let command_name = "summary::session_report";
    let start = Instant::now();

    let result = if metadata.operator_id.trim() == ctx.operator_id {
        Ok(ctx.summary.report(metadata).await)
    } else {
        Err(ShiftlineError::InvalidInput(format!(
            "session belongs to operator {}, not {}",
            ctx.operator_id,
            metadata.operator_id.trim()
        )))
    };

    finish(command_name, start, result)
}

/// Totals over the sessions of the last `days` days, from the backend.
///
/// # Errors
/// Returns `ShiftlineError::InvalidInput` when `days` is 0 and
/// `ShiftlineError::Remote` when the backend fails or rejects the request.
pub async fn session_history(ctx: &SessionContext, days: u32) -> Result<SessionHistorySummary> {
    let command_name = "summary::session_history";
    let start = Instant::now();

    info!(command = command_name, days, "Fetching session history");

    let result = ctx.session_history.recent(days).await;
    finish(command_name, start, result)
}
