//! Live activity tracking
//!
//! The state machine holds at most one running activity per operator
//! session; the ticker publishes its elapsed time once per interval.

pub mod format;
pub mod service;
pub mod ticker;

pub use format::format_elapsed;
pub use service::{ActivityStateMachine, ClosedInterval, TransitionKind, TransitionOutcome};
pub use ticker::{ActivityTicker, ElapsedTick, TickerError};
