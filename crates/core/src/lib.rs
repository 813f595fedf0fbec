//! # Shiftline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The single-active-activity state machine and its ticker
//! - The per operator-day history ledger
//! - The shift timeline layout engine
//! - The session summary aggregator
//! - Port interfaces (traits) for storage, the report backend and the clock
//!
//! ## Architecture Principles
//! - Only depends on `shiftline-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod clock;
pub mod history;
pub mod summary;
pub mod timeline;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use clock::{Clock, ManualClock, SystemClock};
pub use history::ports::KeyValueStore;
pub use history::{ActivityHistoryLedger, AppendOutcome, HistoryKey};
pub use summary::{SessionHistoryService, SessionSummaryAggregator};
pub use timeline::ports::ReportBackend;
pub use timeline::TimelineService;
pub use tracking::{
    ActivityStateMachine, ActivityTicker, ClosedInterval, ElapsedTick, TickerError,
    TransitionKind, TransitionOutcome,
};
