//! Observability for sqljson
//!
//! Structured JSON logging of typed events. Nothing is written below the
//! minimum severity, which defaults to WARN.
//!
//! # Usage
//!
//! ```ignore
//! use sqljson::observability::{Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
