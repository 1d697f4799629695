//! Event log subscribers

use std::sync::Mutex;

use crate::log::{LogDomain, LogEvent, LogLevel};

/// A subscriber on the event log
pub trait LogSink: Send + Sync {
    fn record(&self, event: &LogEvent);
}

/// Forwards domain events into `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, event: &LogEvent) {
        let domain = event.domain.label();
        let context = event.context.as_deref().unwrap_or("");
        match event.level {
            LogLevel::Trace => tracing::trace!(domain, context, "{}", event.message),
            LogLevel::Debug => tracing::debug!(domain, context, "{}", event.message),
            LogLevel::Info => tracing::info!(domain, context, "{}", event.message),
            LogLevel::Warn => tracing::warn!(domain, context, "{}", event.message),
            LogLevel::Error => tracing::error!(domain, context, "{}", event.message),
        }
    }
}

/// Collects events in memory, mostly for tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events whose domain intersects `domain`
    pub fn in_domain(&self, domain: LogDomain) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.domain.intersects(domain))
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn record(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_and_clears() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.record(&LogEvent {
            domain: LogDomain::PRODUCTION,
            level: LogLevel::Info,
            message: "day 30".into(),
            context: Some("county#1".into()),
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.in_domain(LogDomain::PRODUCTION).len(), 1);
        assert!(sink.in_domain(LogDomain::CONSUMPTION).is_empty());

        sink.clear();
        assert!(sink.is_empty());
    }
}
