//! Report backend client
//!
//! HTTP implementation of the `ReportBackend` port: session Gantt data and
//! session history, both wrapped in the backend's `{success, data,
//! message}` envelope.

pub mod client;

pub use client::{HttpReportBackend, ReportClientConfig};
