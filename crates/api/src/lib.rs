//! # Shiftline API
//!
//! Application layer - the command surface the operator UI calls.
//!
//! This crate contains:
//! - Commands (UI → engine bridge)
//! - The session context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture for one operator session

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
