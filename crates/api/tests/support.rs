//! Shared session fixture for command tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use shiftline_api::context::SessionContext;
use shiftline_core::{Clock, KeyValueStore, ManualClock, ReportBackend};
use shiftline_domain::Config;
use shiftline_infra::{HttpReportBackend, MemoryKeyValueStore, ReportClientConfig};
use wiremock::MockServer;

pub const OPERATOR: &str = "OP-7";

/// Site time at +07:00 in June 2026.
pub fn site_time(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7 * 3600)
        .and_then(|offset| offset.with_ymd_and_hms(2026, 6, day, hour, minute, 0).single())
        .expect("valid site time")
}

/// A session over an in-memory store, a manual clock and a mock backend.
pub struct TestSession {
    pub ctx: SessionContext,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryKeyValueStore>,
    pub server: MockServer,
}

impl TestSession {
    pub async fn start_at(now: DateTime<FixedOffset>) -> Self {
        let mut config = Config::default();
        config.clock.tick_interval_ms = 10;
        config.history.retention_days = 7;
        Self::with_config(config, now).await
    }

    pub async fn with_config(config: Config, now: DateTime<FixedOffset>) -> Self {
        let server = MockServer::start().await;
        let backend = HttpReportBackend::new(ReportClientConfig {
            base_url: format!("{}/api", server.uri()),
            timeout: Duration::from_millis(500),
            max_attempts: 1,
            base_backoff: Duration::from_millis(10),
        })
        .expect("backend client");

        let clock = Arc::new(ManualClock::new(now));
        let store = Arc::new(MemoryKeyValueStore::new());

        let ctx = SessionContext::with_components(
            config,
            OPERATOR,
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            Arc::new(backend) as Arc<dyn ReportBackend>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        )
        .expect("session context");

        Self { ctx, clock, store, server }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(chrono::Duration::minutes(minutes));
    }
}
