//! Aggregate statistics over an operator-day of history

use shiftline_domain::{ActivityRecord, HistoryStats};

/// Count, summed duration, per-category breakdown and most frequent
/// activity code.
///
/// Codes are counted in first-encountered order and then stably sorted by
/// count, so ties go to the code seen first (the most recent, since ledger
/// lists are newest first).
pub fn compute_stats(records: &[ActivityRecord]) -> HistoryStats {
    let mut stats = HistoryStats::default();
    let mut frequency: Vec<(&str, usize)> = Vec::new();

    for record in records {
        stats.total_activities += 1;
        stats.total_duration += record.total_seconds;

        let category = stats.by_category.entry(record.source_tab).or_default();
        category.count += 1;
        category.duration += record.total_seconds;

        match frequency.iter_mut().find(|(code, _)| *code == record.activity_code) {
            Some((_, count)) => *count += 1,
            None => frequency.push((record.activity_code.as_str(), 1)),
        }
    }

    frequency.sort_by(|left, right| right.1.cmp(&left.1));
    stats.most_frequent_activity = frequency.first().map(|(code, _)| (*code).to_string());
    stats
}
