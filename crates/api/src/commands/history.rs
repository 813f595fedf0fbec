//! Activity history commands

use std::time::Instant;

use chrono::NaiveDate;
use shiftline_domain::{ActivityRecord, HistoryStats, Result};
use tracing::info;

use crate::context::SessionContext;
use crate::utils::logging::{finish, finish_ok};

/// Records of one day (today when `date` is `None`), newest first.
pub async fn activity_history(ctx: &SessionContext, date: Option<NaiveDate>) -> Vec<ActivityRecord> {
    let command_name = "history::activity_history";
    let start = Instant::now();

    let records = ctx.ledger.load(&ctx.operator_id, date).await;
    finish_ok(command_name, start, records)
}

/// Delete one day's list (today when `date` is `None`).
///
/// # Errors
/// Returns `ShiftlineError::Persistence` if the list cannot be removed.
pub async fn clear_history(ctx: &SessionContext, date: Option<NaiveDate>) -> Result<()> {
    let command_name = "history::clear_history";
    let start = Instant::now();

    info!(command = command_name, date = ?date, "Clearing activity history");

    let result = ctx.ledger.clear(&ctx.operator_id, date).await;
    finish(command_name, start, result)
}

/// Records of every day in `[from, to]`, newest first. Empty when `from`
/// is after `to`.
pub async fn export_history(
    ctx: &SessionContext,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ActivityRecord> {
    let command_name = "history::export_history";
    let start = Instant::now();

    let records = ctx.ledger.export_range(&ctx.operator_id, from, to).await;
    finish_ok(command_name, start, records)
}

/// Remove lists older than `days_to_keep` days (the configured retention
/// when `None`). Returns the number of lists removed.
///
/// # Errors
/// Returns `ShiftlineError::Persistence` if the store cannot be listed or
/// written.
pub async fn cleanup_history(ctx: &SessionContext, days_to_keep: Option<u32>) -> Result<usize> {
    let command_name = "history::cleanup_history";
    let start = Instant::now();

    let days_to_keep = days_to_keep.unwrap_or(ctx.config.history.retention_days);
    info!(command = command_name, days_to_keep, "Cleaning up activity history");

    let result = ctx.ledger.cleanup(&ctx.operator_id, days_to_keep).await;
    finish(command_name, start, result)
}

pub async fn history_stats(ctx: &SessionContext) -> HistoryStats {
    let command_name = "history::history_stats";
    let start = Instant::now();

    let stats = ctx.ledger.stats(&ctx.operator_id).await;
    finish_ok(command_name, start, stats)
}
