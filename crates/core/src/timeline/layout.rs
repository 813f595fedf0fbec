//! Timeline layout engine
//!
//! Pure functions: a shift type plus a list of intervals in, axis labels,
//! positioned bars and per-category totals out. Positions are percentages of
//! the 12-hour shift window. Night shifts start at 18:00 and wrap past
//! midnight, so morning hours (< 12) are shifted by +24 before positioning.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Timelike};
use shiftline_domain::constants::{
    DAY_SHIFT_START_HOUR, FULL_WIDTH_PERCENT, MIN_ENTRY_WIDTH_PERCENT, NIGHT_SHIFT_START_HOUR,
    SHIFT_LENGTH_HOURS,
};
use shiftline_domain::types::activity::rounded_seconds;
use shiftline_domain::{
    CategorySummary, ShiftType, SourceTab, TimeLabel, TimelineEntry, TimelineInterval,
    TimelineLayout,
};

/// Lay out a shift.
///
/// Intervals without an end are treated as running until `now`; that end
/// is provisional and only used here. Entries come back ordered by start
/// time.
///
/// `now` also fixes the site offset: every timestamp is read as wall-clock
/// time at `now.offset()`, whatever offset it arrived with.
pub fn layout(
    shift_type: ShiftType,
    intervals: &[TimelineInterval],
    now: DateTime<FixedOffset>,
) -> TimelineLayout {
    let site = *now.offset();
    let mut entries: Vec<TimelineEntry> = intervals
        .iter()
        .map(|interval| {
            let start_time = interval.start_time.with_timezone(&site);
            let end_time = interval.end_time.unwrap_or(now).with_timezone(&site);
            let total_seconds = interval
                .total_seconds
                .unwrap_or_else(|| rounded_seconds(start_time, end_time))
                .max(0);
            let (left_percent, width_percent) = place_interval(shift_type, start_time, end_time);

            TimelineEntry {
                activity_name: interval.activity_name.clone(),
                activity_code: interval.activity_code.clone(),
                category: interval.category,
                color: interval.category.color().to_string(),
                left_percent,
                width_percent,
                start_time,
                end_time,
                total_seconds,
                ongoing: interval.is_ongoing(),
            }
        })
        .collect();
    entries.sort_by(|left, right| left.start_time.cmp(&right.start_time));

    let category_summary =
        category_summary(entries.iter().map(|entry| (entry.category, entry.total_seconds)));
    let total_seconds = entries.iter().map(|entry| entry.total_seconds).sum();

    TimelineLayout {
        shift: shift_type.window(),
        time_labels: time_labels(shift_type),
        entries,
        category_summary,
        total_seconds,
    }
}

/// One label per hour from shift start to shift end inclusive (13 labels).
pub fn time_labels(shift_type: ShiftType) -> Vec<TimeLabel> {
    (0..=SHIFT_LENGTH_HOURS)
        .map(|offset| {
            let hour = (shift_start_hour(shift_type) + offset) % 24;
            TimeLabel {
                hour,
                label: format!("{hour:02}:00"),
                position: f64::from(offset) / f64::from(SHIFT_LENGTH_HOURS) * FULL_WIDTH_PERCENT,
            }
        })
        .collect()
}

/// `(left, width)` of an interval, in percent of the shift window.
///
/// Hours are read in each timestamp's own offset; callers holding mixed
/// offsets convert to the site offset first.
///
/// `left` is clamped to `[0, 100]`. `width` is floored at 1% so very short
/// activities stay visible, then capped so the bar never passes the right
/// edge.
pub fn place_interval(
    shift_type: ShiftType,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> (f64, f64) {
    let span = f64::from(SHIFT_LENGTH_HOURS);
    let start_offset = hours_into_shift(shift_type, fractional_hour(&start));
    let end_offset = hours_into_shift(shift_type, fractional_hour(&end));

    let left = (start_offset / span * FULL_WIDTH_PERCENT).clamp(0.0, FULL_WIDTH_PERCENT);
    let width = ((end_offset - start_offset) / span * FULL_WIDTH_PERCENT)
        .max(MIN_ENTRY_WIDTH_PERCENT)
        .min(FULL_WIDTH_PERCENT - left);

    (left, width)
}

/// Group durations by category and compute each category's share.
///
/// Each percentage is rounded on its own and the set is not renormalized,
/// so it can sum to 99 or 101. A zero grand total yields 0% everywhere.
pub fn category_summary(
    durations: impl IntoIterator<Item = (SourceTab, i64)>,
) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<SourceTab, (usize, i64)> = BTreeMap::new();
    for (category, seconds) in durations {
        let entry = totals.entry(category).or_default();
        entry.0 += 1;
        entry.1 += seconds.max(0);
    }

    let grand_total: i64 = totals.values().map(|(_, seconds)| seconds).sum();

    totals
        .into_iter()
        .map(|(category, (count, total_seconds))| CategorySummary {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            count,
            total_seconds,
            percentage: percentage_of(total_seconds, grand_total),
        })
        .collect()
}

fn percentage_of(part: i64, whole: i64) -> u32 {
    if whole <= 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

fn shift_start_hour(shift_type: ShiftType) -> u32 {
    match shift_type {
        ShiftType::Day => DAY_SHIFT_START_HOUR,
        ShiftType::Night => NIGHT_SHIFT_START_HOUR,
    }
}

/// Hour of day with minutes as a fraction (seconds are ignored).
fn fractional_hour(time: &DateTime<FixedOffset>) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

fn hours_into_shift(shift_type: ShiftType, hour: f64) -> f64 {
    let hour = match shift_type {
        ShiftType::Night if hour < 12.0 => hour + 24.0,
        _ => hour,
    };
    hour - f64::from(shift_start_hour(shift_type))
}
