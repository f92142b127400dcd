//! Observability for the roster
//!
//! - Structured JSON logging
//! - Typed lifecycle events
//! - Monotonic counters
//!
//! Observability never fails the operation being observed.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, RosterMetrics};

/// Log an event at the severity it carries
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event, fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::HydrateStart, &[]);
        log_event(Event::StoreCorrupt, &[("blob", "students")]);
    }
}
