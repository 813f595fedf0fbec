//! Shared test helpers for `shiftline-core` integration tests.
//!
//! In-memory stand-ins for the storage and backend ports plus clock and
//! record fixtures, so tests can focus on behaviour instead of wiring.

#![allow(dead_code)]

pub mod backend;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use shiftline_core::{ActivityHistoryLedger, ActivityStateMachine, ManualClock};
use shiftline_domain::{ActivityRecord, RunningActivity, SourceTab};

pub use backend::StubReportBackend;
pub use store::MockKeyValueStore;

pub const OPERATOR: &str = "OP-042";

/// `2026-05-{day} {hour}:{minute}:00` at UTC+08:00.
pub fn site_time(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 5, day, hour, minute, 0)
        .unwrap()
}

/// Store, clock and ledger wired together.
pub struct LedgerFixture {
    pub store: Arc<MockKeyValueStore>,
    pub clock: Arc<ManualClock>,
    pub ledger: Arc<ActivityHistoryLedger>,
}

impl LedgerFixture {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        let store = Arc::new(MockKeyValueStore::default());
        let clock = Arc::new(ManualClock::new(now));
        let ledger = Arc::new(ActivityHistoryLedger::new(store.clone(), clock.clone()));
        Self { store, clock, ledger }
    }

    pub fn machine(&self) -> Arc<ActivityStateMachine> {
        Arc::new(ActivityStateMachine::new(OPERATOR, self.ledger.clone(), self.clock.clone()))
    }
}

/// A valid closed record of `minutes` length starting at `start`.
pub fn record(
    code: &str,
    tab: SourceTab,
    start: DateTime<FixedOffset>,
    minutes: i64,
) -> ActivityRecord {
    let running = RunningActivity {
        activity_name: format!("Activity {code}"),
        activity_code: code.to_string(),
        source_tab: tab,
        start_time: start,
    };
    let end = start + chrono::Duration::minutes(minutes);
    ActivityRecord::close(OPERATOR, &running, end, end)
}
