//! Once-per-interval elapsed-time signal for the running activity
//!
//! The ticker never counts ticks. Each tick asks the state machine for
//! `now - start`, so missed ticks (suspended process, busy runtime) are
//! corrected on the next one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shiftline_domain::ShiftlineError;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::service::ActivityStateMachine;

/// Elapsed time of the running activity at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedTick {
    pub elapsed_seconds: i64,
    /// `HH:MM:SS`
    pub formatted: String,
}

/// Ticker lifecycle errors
#[derive(Debug, Error)]
pub enum TickerError {
    #[error("Ticker already running")]
    AlreadyRunning,

    #[error("Ticker not running")]
    NotRunning,

    #[error("Ticker task failed: {0}")]
    TaskJoinFailed(String),
}

impl From<TickerError> for ShiftlineError {
    fn from(err: TickerError) -> Self {
        match err {
            TickerError::AlreadyRunning | TickerError::NotRunning => {
                ShiftlineError::InvalidInput(err.to_string())
            }
            TickerError::TaskJoinFailed(_) => ShiftlineError::Internal(err.to_string()),
        }
    }
}

/// Background task publishing [`ElapsedTick`]s on a watch channel.
///
/// Publishes `None` while no activity is running.
pub struct ActivityTicker {
    machine: Arc<ActivityStateMachine>,
    interval: Duration,
    sender: watch::Sender<Option<ElapsedTick>>,
    cancellation_token: Mutex<CancellationToken>,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl ActivityTicker {
    pub fn new(machine: Arc<ActivityStateMachine>, interval: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            machine,
            interval: interval.max(Duration::from_millis(1)),
            sender,
            cancellation_token: Mutex::new(CancellationToken::new()),
            task_handle: Mutex::new(None),
        }
    }

    /// Receiver for the tick stream. The current value is the latest tick.
    pub fn subscribe(&self) -> watch::Receiver<Option<ElapsedTick>> {
        self.sender.subscribe()
    }

    /// Spawn the tick loop on the current tokio runtime.
    ///
    /// # Errors
    /// Returns `TickerError::AlreadyRunning` if the loop is active.
    pub fn start(&self) -> Result<(), TickerError> {
        let mut handle = self.task_handle.lock();
        if handle.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(TickerError::AlreadyRunning);
        }

        // Fresh token so the ticker can be restarted after a stop.
        let cancel = CancellationToken::new();
        *self.cancellation_token.lock() = cancel.clone();

        let machine = Arc::clone(&self.machine);
        let sender = self.sender.clone();
        let period = self.interval;
        *handle = Some(tokio::spawn(async move {
            Self::tick_loop(machine, sender, period, cancel).await;
        }));

        info!(interval_ms = period.as_millis() as u64, "activity ticker started");
        Ok(())
    }

    /// Cancel the tick loop and wait for it to finish.
    ///
    /// # Errors
    /// Returns `TickerError::NotRunning` if there is no active loop.
    pub async fn stop(&self) -> Result<(), TickerError> {
        let task = self.task_handle.lock().take();
        let Some(task) = task else {
            return Err(TickerError::NotRunning);
        };

        self.cancellation_token.lock().cancel();
        task.await.map_err(|err| TickerError::TaskJoinFailed(err.to_string()))?;

        info!("activity ticker stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.task_handle.lock().as_ref().is_some_and(|task| !task.is_finished())
    }

    async fn tick_loop(
        machine: Arc<ActivityStateMachine>,
        sender: watch::Sender<Option<ElapsedTick>>,
        period: Duration,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("tick loop cancelled");
                    break;
                }
                _ = interval.tick() => {
                    sender.send_replace(machine.tick());
                }
            }
        }
    }
}

impl Drop for ActivityTicker {
    fn drop(&mut self) {
        self.cancellation_token.lock().cancel();
    }
}
