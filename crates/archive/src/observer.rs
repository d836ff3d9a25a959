//! Progress and diagnostic observers
//!
//! Runs report progress through an injected [`Observer`] instead of printing.
//! Every method has a no-op default, so implementations only override what
//! they display.

use tracing::{debug, info, warn};

/// Receiver for run progress and diagnostics
pub trait Observer {
    /// A new phase of the run started
    fn stage(&mut self, _message: &str) {}

    /// Number of archive entries, when a counting pass ran
    fn total(&mut self, _entries: usize) {}

    /// One unit of work finished
    fn tick(&mut self, _message: &str) {}

    /// A recoverable problem was found and skipped
    fn warning(&mut self, _message: &str) {}
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Observer that forwards to `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver {
    total: Option<usize>,
    ticks: usize,
}

impl TracingObserver {
    /// Create a new tracing observer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for TracingObserver {
    fn stage(&mut self, message: &str) {
        info!("{}", message);
    }

    fn total(&mut self, entries: usize) {
        self.total = Some(entries);
        info!("Found {} entries in the archive.", entries);
    }

    fn tick(&mut self, message: &str) {
        self.ticks += 1;
        match self.total {
            Some(total) => debug!("[{}/{}] {}", self.ticks, total, message),
            None => debug!("[{}] {}", self.ticks, message),
        }
    }

    fn warning(&mut self, message: &str) {
        warn!("{}", message);
    }
}

/// Observer that records what it is told
#[derive(Debug, Default, Clone)]
pub struct CollectingObserver {
    /// Stage messages in order
    pub stages: Vec<String>,
    /// Total reported by the counting pass
    pub total: Option<usize>,
    /// Number of ticks
    pub ticks: usize,
    /// Warning messages in order
    pub warnings: Vec<String>,
}

impl Observer for CollectingObserver {
    fn stage(&mut self, message: &str) {
        self.stages.push(message.to_string());
    }

    fn total(&mut self, entries: usize) {
        self.total = Some(entries);
    }

    fn tick(&mut self, _message: &str) {
        self.ticks += 1;
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
