//! Elapsed-time formatting

/// Format whole seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits but not capped, so a 30-hour run
/// prints `30:00:00`. Negative input is treated as zero.
///
/// # Examples
///
/// ```
/// use shiftline_core::tracking::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00:00");
/// assert_eq!(format_elapsed(3_725), "01:02:05");
/// assert_eq!(format_elapsed(360_000), "100:00:00");
/// ```
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}
