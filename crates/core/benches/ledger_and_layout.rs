use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parking_lot::Mutex;
use shiftline_core::timeline::layout;
use shiftline_core::{ActivityHistoryLedger, Clock, KeyValueStore, ManualClock};
use shiftline_domain::{
    ActivityRecord, Result as DomainResult, RunningActivity, ShiftType, SourceTab,
    TimelineInterval,
};

#[derive(Default)]
struct BenchStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for BenchStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn list_all_keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }

    async fn remove_many(&self, keys: &[String]) -> DomainResult<()> {
        let mut entries = self.entries.lock();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

fn shift_start() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .and_then(|offset| offset.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).single())
        .expect("valid time")
}

fn night_intervals(count: i64) -> Vec<TimelineInterval> {
    let tabs = SourceTab::ALL;
    (0..count)
        .map(|idx| {
            let start = shift_start() + Duration::minutes(idx * 12);
            TimelineInterval {
                activity_name: format!("Activity {idx}"),
                activity_code: format!("A{idx:03}"),
                category: tabs[(idx as usize) % tabs.len()],
                start_time: start,
                end_time: Some(start + Duration::minutes(10)),
                total_seconds: Some(600),
            }
        })
        .collect()
}

fn record(idx: i64) -> ActivityRecord {
    let start = shift_start() + Duration::minutes(idx);
    let running = RunningActivity {
        activity_name: "Hauling".into(),
        activity_code: "HL01".into(),
        source_tab: SourceTab::Work,
        start_time: start,
    };
    let end = start + Duration::seconds(45);
    ActivityRecord::close("OP-BENCH", &running, end, end)
}

fn timeline_layout_benchmark(c: &mut Criterion) {
    let intervals = night_intervals(60);
    let now = shift_start() + Duration::hours(12);

    let mut group = c.benchmark_group("timeline");
    group.bench_function("night_layout_60_intervals", |b| {
        b.iter(|| layout(ShiftType::Night, black_box(&intervals), now));
    });
    group.finish();
}

fn ledger_append_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(shift_start()));
    let ledger = Arc::new(ActivityHistoryLedger::new(Arc::new(BenchStore::default()), clock));

    // Fill the day to the cap so every append also truncates.
    runtime.block_on(async {
        for idx in 0..50 {
            ledger.append("OP-BENCH", record(idx)).await.expect("seed append");
        }
    });

    let mut group = c.benchmark_group("ledger");
    group.sample_size(50);
    group.bench_function("append_at_cap", |b| {
        let mut idx = 50;
        b.iter(|| {
            idx += 1;
            let ledger = Arc::clone(&ledger);
            runtime.block_on(async move {
                ledger.append("OP-BENCH", record(idx)).await.expect("append");
            });
        });
    });
    group.finish();
}

criterion_group!(core_benchmarks, timeline_layout_benchmark, ledger_append_benchmark);
criterion_main!(core_benchmarks);
