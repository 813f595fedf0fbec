//! Command helpers

pub mod logging;
