//! Observable events for sqljson
//!
//! Events are explicit and typed. Each carries the severity it is logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A JSON decode into a nullable wrapper failed
    DecodeRejected,
    /// A custom type function was registered with a validator
    AdapterRegistered,
    /// A struct failed validation
    ValidationFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DecodeRejected => "JSON_DECODE_REJECTED",
            Event::AdapterRegistered => "VALIDATOR_ADAPTER_REGISTERED",
            Event::ValidationFailed => "VALIDATION_FAILED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DecodeRejected | Event::AdapterRegistered => Severity::Trace,
            Event::ValidationFailed => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
