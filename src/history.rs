use chrono::{DateTime, Local};
use serde::Serialize;

pub const HISTORY_CAPACITY: usize = 10;

/// Format shared by history entries and popups.
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "timestampMillis")]
    timestamp_millis: i64,
    #[serde(rename = "time")]
    display_time: String,
    message: String,
}

impl HistoryEntry {
    fn new(message: String, at: DateTime<Local>) -> Self {
        Self {
            timestamp_millis: at.timestamp_millis(),
            display_time: at.format(TIME_FORMAT).to_string(),
            message,
        }
    }

    #[cfg(test)]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn display_time(&self) -> &str {
        &self.display_time
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Past deliveries, newest first, bounded to `HISTORY_CAPACITY`.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>, at: DateTime<Local>) {
        self.entries.insert(0, HistoryEntry::new(message.into(), at));
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
