//! Operator-facing commands
//!
//! Each command takes the session context, logs its execution and returns
//! a serializable view model.

pub mod history;
pub mod summary;
pub mod timeline;
pub mod tracking;

pub use history::*;
pub use summary::*;
pub use timeline::*;
pub use tracking::*;
