//! Observability subsystem for itportal
//!
//! - Structured logging through `tracing` (text or JSON)
//! - Typed lifecycle events with stable names
//!
//! # Usage
//!
//! ```ignore
//! use itportal::observability::{init_logging, log_event, Event, LogConfig};
//!
//! init_logging(&LogConfig::default());
//! log_event(Event::BootStart);
//! ```

mod events;
mod logging;

pub use events::Event;
pub use logging::{init_logging, LogConfig};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    if event.is_fatal() {
        tracing::error!(event = event.as_str());
    } else {
        tracing::info!(event = event.as_str());
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let detail = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");

    if event.is_fatal() {
        tracing::error!(event = event.as_str(), %detail);
    } else {
        tracing::info!(event = event.as_str(), %detail);
    }
}
