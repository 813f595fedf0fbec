//! # Shiftline Domain
//!
//! Business domain types and models for Shiftline.
//!
//! This crate contains:
//! - Activity records, live activity state and shift windows
//! - Timeline and statistics view models
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Shiftline crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
