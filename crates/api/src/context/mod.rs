//! Session context - dependency injection container
//!
//! One context per logged-in operator. It owns the live state machine, so
//! it must be built once per session and shared (`Arc<SessionContext>`).

use std::sync::Arc;
use std::time::Duration;

use shiftline_core::{
    ActivityHistoryLedger, ActivityStateMachine, ActivityTicker, Clock, KeyValueStore,
    ReportBackend, SessionHistoryService, SessionSummaryAggregator, SystemClock, TimelineService,
    TransitionOutcome,
};
use shiftline_domain::{Config, Result, ShiftlineError};
use shiftline_infra::{HttpReportBackend, SqliteKeyValueStore, StoreManager};
use tracing::{info, warn};

/// Session context - holds all services and dependencies
pub struct SessionContext {
    pub config: Config,
    pub operator_id: String,
    pub clock: Arc<dyn Clock>,
    pub store: Arc<dyn KeyValueStore>,
    pub ledger: Arc<ActivityHistoryLedger>,
    pub machine: Arc<ActivityStateMachine>,
    pub ticker: Arc<ActivityTicker>,
    pub timeline: Arc<TimelineService>,
    pub summary: Arc<SessionSummaryAggregator>,
    pub session_history: Arc<SessionHistoryService>,
}

impl SessionContext {
    /// Build the production context: SQLite-backed ledger, HTTP report
    /// backend and the system clock.
    ///
    /// # Errors
    /// Returns `ShiftlineError::InvalidInput` for a blank operator id,
    /// `ShiftlineError::Config` for an invalid backend URL or clock offset,
    /// and `ShiftlineError::Persistence` if the store cannot be opened.
    pub async fn new(config: Config, operator_id: &str) -> Result<Self> {
        info!(storage = %config.storage.path, "initializing session context");

        let storage_config = config.storage.clone();
        let manager = tokio::task::spawn_blocking(move || StoreManager::from_config(&storage_config))
            .await
            .map_err(|err| ShiftlineError::Internal(format!("store setup task failed: {err}")))??;
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(Arc::new(manager)));

        let backend: Arc<dyn ReportBackend> =
            Arc::new(HttpReportBackend::from_config(&config.backend)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_config(&config.clock)?);

        Self::with_components(config, operator_id, store, backend, clock)
    }

    /// Assemble a context from already-built adapters.
    ///
    /// # Errors
    /// Returns `ShiftlineError::InvalidInput` for a blank operator id.
    pub fn with_components(
        config: Config,
        operator_id: &str,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn ReportBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let operator_id = operator_id.trim();
        if operator_id.is_empty() {
            return Err(ShiftlineError::InvalidInput("operator id is required".into()));
        }

        let ledger = Arc::new(ActivityHistoryLedger::with_config(
            Arc::clone(&store),
            Arc::clone(&clock),
            &config.history,
        ));
        let machine =
            Arc::new(ActivityStateMachine::new(operator_id, Arc::clone(&ledger), Arc::clone(&clock)));
        let ticker = Arc::new(ActivityTicker::new(
            Arc::clone(&machine),
            Duration::from_millis(config.clock.tick_interval_ms),
        ));
        let timeline = Arc::new(TimelineService::new(
            Arc::clone(&backend),
            Arc::clone(&ledger),
            Arc::clone(&clock),
        ));
        let summary =
            Arc::new(SessionSummaryAggregator::new(Arc::clone(&ledger), Arc::clone(&clock)));
        let session_history = Arc::new(SessionHistoryService::new(backend));

        info!(operator_id, "session context ready");

        Ok(Self {
            config,
            operator_id: operator_id.to_string(),
            clock,
            store,
            ledger,
            machine,
            ticker,
            timeline,
            summary,
            session_history,
        })
    }

    /// End the session: stop the ticker and close the running activity.
    ///
    /// The closed interval's fate is returned; a persistence failure there
    /// does not fail the logout.
    pub async fn shutdown(&self) -> TransitionOutcome {
        if self.ticker.is_running() {
            if let Err(err) = self.ticker.stop().await {
                warn!(error = %err, "failed to stop activity ticker");
            }
        }

        let outcome = self.machine.stop().await;
        if let Some(err) = outcome.persistence_error() {
            warn!(operator_id = %self.operator_id, error = %err, "last activity was not saved");
        }

        info!(operator_id = %self.operator_id, "session context shut down");
        outcome
    }
}
