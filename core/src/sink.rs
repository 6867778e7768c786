//! Bounded, newest-first displays of log lines and operation results.
//!
//! # Design
//! Both sinks wrap a `BoundedLog` behind a mutex. `push` inserts at the front
//! and evicts from the back inside one critical section, so concurrent
//! operations can never observe or produce an over-capacity log.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::HttpMethod;

pub const LOG_CAPACITY: usize = 20;
pub const RESULT_CAPACITY: usize = 10;

/// Fixed-capacity deque; newest entry first.
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Info,
    Request,
    Response,
    Error,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogCategory::Info => "info",
            LogCategory::Request => "request",
            LogCategory::Response => "response",
            LogCategory::Error => "error",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub category: LogCategory,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub method: HttpMethod,
    pub endpoint: String,
    pub data: Value,
    pub message: String,
    pub timestamp: String,
}

impl ResultEntry {
    pub fn success(method: HttpMethod, endpoint: &str, data: Value, message: &str) -> Self {
        Self {
            method,
            endpoint: endpoint.to_string(),
            data,
            message: message.to_string(),
            timestamp: now(),
        }
    }

    pub fn failure(method: HttpMethod, endpoint: &str, reason: &str, message: &str) -> Self {
        Self::success(method, endpoint, json!({ "error": reason }), message)
    }

    pub fn is_error(&self) -> bool {
        self.data.get("error").is_some()
    }
}

/// Network log, capped at `LOG_CAPACITY`.
#[derive(Debug)]
pub struct LogSink {
    inner: Mutex<BoundedLog<LogEntry>>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BoundedLog::new(LOG_CAPACITY)),
        }
    }
}

impl LogSink {
    pub fn push(&self, category: LogCategory, text: impl Into<String>) {
        let entry = LogEntry {
            timestamp: now(),
            category,
            text: text.into(),
        };
        lock(&self.inner).push(entry);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.inner).iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    pub fn clear(&self) {
        lock(&self.inner).clear();
    }
}

/// Results panel, capped at `RESULT_CAPACITY`.
#[derive(Debug)]
pub struct ResultSink {
    inner: Mutex<BoundedLog<ResultEntry>>,
}

impl Default for ResultSink {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BoundedLog::new(RESULT_CAPACITY)),
        }
    }
}

impl ResultSink {
    pub fn push(&self, entry: ResultEntry) {
        lock(&self.inner).push(entry);
    }

    pub fn entries(&self) -> Vec<ResultEntry> {
        lock(&self.inner).iter().cloned().collect()
    }

    pub fn newest(&self) -> Option<ResultEntry> {
        lock(&self.inner).iter().next().cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    pub fn clear(&self) {
        lock(&self.inner).clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_log_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn log_sink_never_exceeds_capacity() {
        let sink = LogSink::default();
        for i in 0..(LOG_CAPACITY * 2 + 3) {
            sink.push(LogCategory::Info, format!("line {i}"));
            assert!(sink.len() <= LOG_CAPACITY);
        }
        let entries = sink.entries();
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries[0].text, format!("line {}", LOG_CAPACITY * 2 + 2));
        assert_eq!(entries[LOG_CAPACITY - 1].text, format!("line {}", LOG_CAPACITY + 3));
    }

    #[test]
    fn result_sink_keeps_ten_newest() {
        let sink = ResultSink::default();
        for i in 0..15 {
            sink.push(ResultEntry::success(
                HttpMethod::Post,
                "/posts",
                json!({ "id": i }),
                "Post created successfully!",
            ));
        }
        assert_eq!(sink.len(), RESULT_CAPACITY);
        assert_eq!(sink.newest().unwrap().data["id"], 14);
        assert_eq!(sink.entries().last().unwrap().data["id"], 5);
    }

    #[test]
    fn failure_entry_wraps_reason() {
        let entry = ResultEntry::failure(HttpMethod::Delete, "/posts/7", "HTTP 500: Internal Server Error", "Failed to delete post");
        assert!(entry.is_error());
        assert_eq!(entry.data, json!({ "error": "HTTP 500: Internal Server Error" }));
    }

    #[test]
    fn log_entry_renders_timestamp_prefix() {
        let sink = LogSink::default();
        sink.push(LogCategory::Request, "Deleting post 7");
        let entry = &sink.entries()[0];
        assert_eq!(entry.timestamp.len(), "HH:MM:SS".len());
        assert!(entry.to_string().ends_with("] Deleting post 7"));
        assert_eq!(entry.category.to_string(), "request");
    }

    #[test]
    fn clear_empties_both_sinks() {
        let logs = LogSink::default();
        let results = ResultSink::default();
        logs.push(LogCategory::Info, "ready");
        results.push(ResultEntry::success(HttpMethod::Get, "/posts/1", json!({}), "ok"));
        logs.clear();
        results.clear();
        assert!(logs.is_empty());
        assert!(results.is_empty());
    }
}
