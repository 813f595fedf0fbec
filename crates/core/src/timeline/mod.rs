//! Shift timeline ("Gantt") layout

pub mod layout;
pub mod ports;
pub mod service;

pub use layout::{category_summary, layout, place_interval, time_labels};
pub use ports::ReportBackend;
pub use service::{unwrap_envelope, TimelineService};
