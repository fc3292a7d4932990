//! Diagnostic sinks for records a host may surface in its build log.
//!
//! Resolution never fails outright; anything a user should know about
//! (expanded macros, expansion failures) is written to a [`DiagnosticSink`].

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Receiver for informational and error records produced during resolution.
pub trait DiagnosticSink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(event = "diagnostic.info", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(event = "diagnostic.error", "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Error,
}

/// A recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// In-memory sink that keeps every record in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Records at the given level.
    pub fn at_level(&self, level: DiagnosticLevel) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.level == level)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.lock().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(DiagnosticLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(DiagnosticLevel::Error, message);
    }
}
