//! Lifecycle events for itportal
//!
//! Events are explicit and typed; each carries a stable name logged in the
//! `event` field.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Connection pool ready
    PoolReady,
    /// Table schemas cached
    SchemaWarmed,
    /// Listening for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,

    // Failures
    /// Startup aborted
    BootFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "ITPORTAL_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::PoolReady => "DB_POOL_READY",
            Event::SchemaWarmed => "SCHEMA_WARMED",
            Event::Serving => "ITPORTAL_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "ITPORTAL_STARTUP_FAILED",
        }
    }

    /// Returns true if this event ends the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
