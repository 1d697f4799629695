//! Domain event log
//!
//! An explicit, injectable log object: each tick system holds its own
//! `EventLog` handle, there is no process-wide registry. Events carry a
//! domain and a level and are delivered to every subscribed sink that
//! passes the log's filter. Having no sinks is valid.

pub mod sink;

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use sink::{LogSink, MemorySink, TracingSink};

/// Bitmask of log domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogDomain(pub u32);

impl LogDomain {
    pub const NONE: LogDomain = LogDomain(0);
    pub const SIMULATION: LogDomain = LogDomain(1 << 0);
    pub const PRODUCTION: LogDomain = LogDomain(1 << 1);
    pub const CONSUMPTION: LogDomain = LogDomain(1 << 2);
    pub const POPULATION: LogDomain = LogDomain(1 << 3);
    pub const DATA: LogDomain = LogDomain(1 << 4);
    pub const ALL: LogDomain = LogDomain(u32::MAX);

    /// True if any bit of `other` is set in `self`
    pub fn intersects(self, other: LogDomain) -> bool {
        self.0 & other.0 != 0
    }

    pub fn label(self) -> &'static str {
        match self {
            LogDomain::SIMULATION => "simulation",
            LogDomain::PRODUCTION => "production",
            LogDomain::CONSUMPTION => "consumption",
            LogDomain::POPULATION => "population",
            LogDomain::DATA => "data",
            _ => "mixed",
        }
    }
}

impl BitOr for LogDomain {
    type Output = LogDomain;

    fn bitor(self, rhs: LogDomain) -> LogDomain {
        LogDomain(self.0 | rhs.0)
    }
}

impl fmt::Display for LogDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// A single domain event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub domain: LogDomain,
    pub level: LogLevel,
    pub message: String,
    pub context: Option<String>,
}

/// Which events reach the sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFilter {
    pub domains: LogDomain,
    pub min_level: LogLevel,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            domains: LogDomain::ALL,
            min_level: LogLevel::Info,
        }
    }
}

impl LogFilter {
    pub fn accepts(&self, domain: LogDomain, level: LogLevel) -> bool {
        level >= self.min_level && self.domains.intersects(domain)
    }
}

/// Multi-subscriber event log
///
/// Cloning is cheap and clones share the same sinks, so one configured log
/// can be handed to several systems.
#[derive(Clone, Default)]
pub struct EventLog {
    filter: LogFilter,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("filter", &self.filter)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl EventLog {
    /// A log with the default filter and no sinks
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: LogFilter) -> Self {
        Self {
            filter,
            sinks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, sink: Arc<dyn LogSink>) {
        self.sinks.push(sink);
    }

    pub fn filter(&self) -> LogFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: LogFilter) {
        self.filter = filter;
    }

    /// Cheap pre-check so callers can skip building expensive messages
    pub fn enabled(&self, domain: LogDomain, level: LogLevel) -> bool {
        !self.sinks.is_empty() && self.filter.accepts(domain, level)
    }

    pub fn emit(
        &self,
        domain: LogDomain,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<String>,
    ) {
        if !self.enabled(domain, level) {
            return;
        }
        let event = LogEvent {
            domain,
            level,
            message: message.into(),
            context,
        };
        for sink in &self.sinks {
            sink.record(&event);
        }
    }

    pub fn debug(&self, domain: LogDomain, message: impl Into<String>) {
        self.emit(domain, LogLevel::Debug, message, None);
    }

    pub fn info(&self, domain: LogDomain, message: impl Into<String>) {
        self.emit(domain, LogLevel::Info, message, None);
    }

    pub fn warn(&self, domain: LogDomain, message: impl Into<String>) {
        self.emit(domain, LogLevel::Warn, message, None);
    }
}
