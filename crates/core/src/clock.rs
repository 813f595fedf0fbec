//! Wall-clock port
//!
//! Every timestamp in the engine comes from a [`Clock`]. Elapsed time is
//! always recomputed as `now - start`, so a suspended process catches up on
//! its next reading instead of drifting.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};
use parking_lot::Mutex;
use shiftline_domain::{ClockConfig, Result, ShiftlineError};

/// Source of the current time, in the site's UTC offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Calendar date of [`Clock::now`]; partitions the history ledger.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Use the host's local offset.
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// Use a fixed site offset regardless of the host timezone.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset: Some(offset) }
    }

    /// Build from configuration.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Config` if the configured offset is out of
    /// range.
    pub fn from_config(config: &ClockConfig) -> Result<Self> {
        match config.utc_offset_minutes {
            None => Ok(Self::local()),
            Some(minutes) => FixedOffset::east_opt(minutes.saturating_mul(60))
                .map(Self::with_offset)
                .ok_or_else(|| {
                    ShiftlineError::Config(format!("UTC offset out of range: {minutes} minutes"))
                }),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Manually driven clock for simulations and tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn manual_clock_advances() {
        let start = FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 5, 1, 23, 59, 30)
            .unwrap();
        let clock = ManualClock::new(start);

        clock.advance(Duration::seconds(45));

        assert_eq!(clock.now(), start + Duration::seconds(45));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }

    #[test]
    fn system_clock_honours_configured_offset() {
        let config = ClockConfig { tick_interval_ms: 1000, utc_offset_minutes: Some(-300) };
        let clock = SystemClock::from_config(&config).unwrap();

        assert_eq!(clock.now().offset().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn system_clock_rejects_out_of_range_offset() {
        let config = ClockConfig { tick_interval_ms: 1000, utc_offset_minutes: Some(24 * 60) };
        assert!(matches!(SystemClock::from_config(&config), Err(ShiftlineError::Config(_))));
    }
}
