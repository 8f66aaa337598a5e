//! Operation Log Model

use serde::{Deserialize, Serialize};

/// Severity of an operation log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Success,
    Error,
}

/// Append-only operation log entry
///
/// Ids are sequential (1-based) and gap-free; entries are never mutated or
/// removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: u64,
    /// Unix millis at append time
    pub timestamp: i64,
    pub message: String,
    pub severity: LogSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
