//! Per operator-day history ledger service

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use dashmap::DashMap;
use shiftline_domain::constants::MAX_HISTORY_ENTRIES;
use shiftline_domain::{ActivityRecord, HistoryConfig, HistoryStats, Result, ShiftlineError};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::key::HistoryKey;
use super::ports::KeyValueStore;
use super::stats::compute_stats;
use crate::clock::Clock;

/// Result of a ledger append that did not hit a storage error.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    /// The record was validated and persisted.
    Stored(ActivityRecord),
    /// The record failed validation and was not persisted.
    Rejected { reason: String },
}

impl AppendOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

/// Append-only store of completed activity records.
///
/// Writes to the same operator-day are serialized so that the
/// read-prepend-truncate-write cycle never interleaves; different
/// operator-days never wait on each other.
pub struct ActivityHistoryLedger {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    max_entries: usize,
    write_gates: DashMap<String, Arc<Mutex<()>>>,
}

impl ActivityHistoryLedger {
    /// Create a ledger with the default 50-entry cap.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock, max_entries: MAX_HISTORY_ENTRIES, write_gates: DashMap::new() }
    }

    /// Create a ledger honouring the configured cap.
    pub fn with_config(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: &HistoryConfig,
    ) -> Self {
        Self::new(store, clock).with_max_entries(config.max_entries_per_day)
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Validate and prepend a record to today's list for the operator.
    ///
    /// Invalid records are logged and reported as
    /// [`AppendOutcome::Rejected`]; they are not an error.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Persistence` if the store cannot be read or
    /// written, or if the existing list cannot be decoded. The stored list is
    /// left untouched in every error case.
    pub async fn append(&self, operator_id: &str, record: ActivityRecord) -> Result<AppendOutcome> {
        if let Err(err) = validate_for_append(operator_id, &record) {
            warn!(
                operator_id,
                activity_code = %record.activity_code,
                error = %err,
                "rejected activity record"
            );
            return Ok(AppendOutcome::Rejected { reason: err.to_string() });
        }

        let key = HistoryKey::new(operator_id, self.clock.today()).to_string();
        let gate = self.write_gate(&key);
        let _turn = gate.lock().await;

        let mut records = self.read_list(&key).await?;
        records.insert(0, record.clone());
        if records.len() > self.max_entries {
            debug!(key = %key, dropped = records.len() - self.max_entries, "truncating history list");
            records.truncate(self.max_entries);
        }

        let payload = serde_json::to_string(&records).map_err(|err| {
            ShiftlineError::Persistence(format!("failed to encode history list: {err}"))
        })?;
        self.store.set(&key, &payload).await?;

        info!(
            operator_id,
            activity_code = %record.activity_code,
            source_tab = %record.source_tab,
            total_seconds = record.total_seconds,
            "activity record appended"
        );
        Ok(AppendOutcome::Stored(record))
    }

    /// Records for an operator-day (today when `date` is `None`), most
    /// recent first.
    ///
    /// Never fails: missing lists, unreadable lists and storage errors all
    /// yield an empty list, the latter two logged.
    pub async fn load(&self, operator_id: &str, date: Option<NaiveDate>) -> Vec<ActivityRecord> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let key = HistoryKey::new(operator_id, date).to_string();

        match self.read_list(&key).await {
            Ok(records) => records,
            Err(err) => {
                error!(key = %key, error = %err, "failed to load activity history");
                Vec::new()
            }
        }
    }

    /// Delete an operator-day list (today when `date` is `None`). Idempotent.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Persistence` if the store rejects the delete.
    pub async fn clear(&self, operator_id: &str, date: Option<NaiveDate>) -> Result<()> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let key = HistoryKey::new(operator_id, date).to_string();
        let gate = self.write_gate(&key);
        let _turn = gate.lock().await;

        self.store.remove(&key).await?;
        info!(key = %key, "activity history cleared");
        Ok(())
    }

    /// Union of the operator's lists over `[start, end]` (inclusive), newest
    /// `timestamp` first.
    pub async fn export_range(
        &self,
        operator_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ActivityRecord> {
        if start > end {
            warn!(%start, %end, "export range is empty: start is after end");
            return Vec::new();
        }

        let keys = match self.store.list_all_keys().await {
            Ok(keys) => keys,
            Err(err) => {
                error!(operator_id, error = %err, "failed to list activity history");
                return Vec::new();
            }
        };

        let mut days: Vec<NaiveDate> = keys
            .iter()
            .filter_map(|raw| HistoryKey::parse(raw))
            .filter(|key| key.belongs_to(operator_id) && (start..=end).contains(&key.date))
            .map(|key| key.date)
            .collect();
        days.sort_unstable();
        days.dedup();

        let mut records = Vec::new();
        for date in days {
            records.extend(self.load(operator_id, Some(date)).await);
        }
        records.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));

        debug!(operator_id, %start, %end, count = records.len(), "exported activity history");
        records
    }

    /// Delete the operator's lists dated strictly before
    /// `today - days_to_keep`. Returns the number of lists removed.
    ///
    /// # Errors
    /// Returns `ShiftlineError::Persistence` if keys cannot be listed or
    /// removed.
    pub async fn cleanup(&self, operator_id: &str, days_to_keep: u32) -> Result<usize> {
        let cutoff = self
            .clock
            .today()
            .checked_sub_days(Days::new(u64::from(days_to_keep)))
            .unwrap_or(NaiveDate::MIN);

        let stale: Vec<String> = self
            .store
            .list_all_keys()
            .await?
            .into_iter()
            .filter(|raw| {
                HistoryKey::parse(raw)
                    .is_some_and(|key| key.belongs_to(operator_id) && key.date < cutoff)
            })
            .collect();

        if stale.is_empty() {
            debug!(operator_id, %cutoff, "no activity history to clean up");
            return Ok(0);
        }

        self.store.remove_many(&stale).await?;
        for key in &stale {
            self.write_gates.remove(key);
        }

        info!(operator_id, %cutoff, removed = stale.len(), "old activity history removed");
        Ok(stale.len())
    }

    /// Statistics over today's records for the operator.
    pub async fn stats(&self, operator_id: &str) -> HistoryStats {
        compute_stats(&self.load(operator_id, None).await)
    }

    async fn read_list(&self, key: &str) -> Result<Vec<ActivityRecord>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };

        // Never read as empty here: `append` must not overwrite it.
        serde_json::from_str(&raw).map_err(|err| {
            warn!(key, error = %err, "unreadable history list");
            ShiftlineError::Persistence(format!("history list {key} cannot be decoded: {err}"))
        })
    }

    fn write_gate(&self, key: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.write_gates.entry(key.to_string()).or_default().value())
    }
}

fn validate_for_append(operator_id: &str, record: &ActivityRecord) -> Result<()> {
    if operator_id.trim().is_empty() {
        return Err(ShiftlineError::Validation("missing operatorId".into()));
    }
    record.validate()
}
