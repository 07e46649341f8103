//! Interactive log records

use serde::{Deserialize, Serialize};

/// One frame of an interactive log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp field as written by the judge
    pub timestamp: String,
    /// Whether the validator (rather than the submission) wrote this payload
    pub is_validator_side: bool,
    /// Raw payload text, not escaped
    pub text: String,
}

/// A parsed interactive log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveLog {
    /// Frames in input order
    pub entries: Vec<LogEntry>,
    /// Truncation marker found at the end of the input, if any
    pub truncation_notice: Option<String>,
}

impl InteractiveLog {
    /// Entries written by the validator
    pub fn validator_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.is_validator_side)
    }

    /// Entries written by the submission
    pub fn submission_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| !e.is_validator_side)
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation_notice.is_some()
    }
}
