//! Observability for rolodex
//!
//! Structured JSON-lines logging over a typed event catalogue.
//! Logging is read-only: it never changes what an operation does.
//!
//! # Usage
//!
//! ```ignore
//! use rolodex::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ContactAdded, &[("id", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields, at the event's severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let name = event.as_str();
    match event.severity() {
        Severity::Trace => Logger::trace(name, fields),
        Severity::Info => Logger::info(name, fields),
        Severity::Warn => Logger::warn(name, fields),
        Severity::Error | Severity::Fatal => Logger::error(name, fields),
    }
}
