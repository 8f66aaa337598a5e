//! Append-only operation log
//!
//! In-memory sequence of log entries recording the outcome of every import
//! and scan request. Ids are 1-based, sequential and gap-free; entries are
//! never mutated or removed, so the sequence doubles as call ordering.

use parking_lot::RwLock;
use shared::models::{LogEntry, LogSeverity};
use shared::util::now_millis;

/// Append-only in-memory log service
#[derive(Debug, Default)]
pub struct EventLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning the next sequential id.
    pub fn append(
        &self,
        message: impl Into<String>,
        severity: LogSeverity,
        details: Option<String>,
    ) -> LogEntry {
        let mut entries = self.entries.write();
        let entry = LogEntry {
            id: entries.len() as u64 + 1,
            timestamp: now_millis(),
            message: message.into(),
            severity,
            details,
        };
        entries.push(entry.clone());
        entry
    }

    /// All entries in insertion order
    pub fn list(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    /// Number of entries appended so far
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
