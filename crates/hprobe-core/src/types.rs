//! Core domain type definitions

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use serde::Serialize;

/// Default number of entries retained by a [`ResultLog`]
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Counter for generating unique result entry IDs
static RESULT_ENTRY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One line in the user-visible result log
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    /// Error-highlighted entries are rendered with a red marker
    pub is_error: bool,
    /// Unique ID for this entry
    pub id: u64,
}

impl ResultEntry {
    /// Create a new entry stamped with the current local time
    pub fn new(message: impl Into<String>, is_error: bool) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            is_error,
            id: RESULT_ENTRY_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create a normal entry
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, false)
    }

    /// Create an error-highlighted entry
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, true)
    }

    /// Format timestamp for display
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// Format for single-line display
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.formatted_time(), self.message)
    }
}

/// Ordered, append-only log of results shown to the user
///
/// Entries are only ever pushed at the back. When the log grows past
/// `max_entries` the oldest entries are evicted.
#[derive(Debug, Clone)]
pub struct ResultLog {
    entries: VecDeque<ResultEntry>,
    max_entries: usize,
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl ResultLog {
    /// Create an empty log retaining at most `max_entries` entries
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Append a message, flagged as error-highlighted or not
    pub fn append(&mut self, message: impl Into<String>, is_error: bool) {
        self.push(ResultEntry::new(message, is_error));
    }

    /// Append a normal entry
    pub fn info(&mut self, message: impl Into<String>) {
        self.append(message, false);
    }

    /// Append an error-highlighted entry
    pub fn error(&mut self, message: impl Into<String>) {
        self.append(message, true);
    }

    /// Append a pre-built entry
    pub fn push(&mut self, entry: ResultEntry) {
        self.entries.push_back(entry);

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ResultEntry> {
        self.entries.back()
    }

    /// Messages only, in order
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    /// Count of error-highlighted entries
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        assert!(!ResultEntry::info("ok").is_error);
        assert!(ResultEntry::error("bad").is_error);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = ResultEntry::info("a");
        let b = ResultEntry::info("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_line_format() {
        let entry = ResultEntry::info("Toast shown");
        let line = entry.display_line();
        assert!(line.ends_with(": Toast shown"));
        assert_eq!(line.len(), "HH:MM:SS: Toast shown".len());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ResultLog::default();
        log.info("first");
        log.error("second");
        log.append("third", false);

        assert_eq!(log.messages(), vec!["first", "second", "third"]);
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.last().map(|e| e.message.as_str()), Some("third"));
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut log = ResultLog::new(2);
        log.info("1");
        log.info("2");
        log.info("3");

        assert_eq!(log.len(), 2);
        assert_eq!(log.messages(), vec!["2", "3"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let mut log = ResultLog::new(0);
        log.info("only");
        assert_eq!(log.max_entries(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut log = ResultLog::default();
        log.info("x");
        log.clear();
        assert!(log.is_empty());
    }
}
