//! Structured logger with a bounded ring buffer and a durable severe-entry overflow.
//!
//! Every accepted entry is also forwarded to `tracing` at the matching level, so
//! the ring buffer is the queryable copy rather than the only sink.

use std::backtrace::Backtrace;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use bay_core::enums::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::KeyValueStore;

/// Storage key of the durable overflow (JSON array).
pub const DURABLE_LOG_KEY: &str = "bayline_critical_logs";

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_DURABLE_CAPACITY: usize = 50;

/// Well-known categories.
pub mod category {
    pub const CAPABILITY: &str = "capability";
    pub const TELEMETRY: &str = "telemetry";
    pub const ORG_CONTEXT: &str = "org_context";
    pub const READ_PATH: &str = "read_path";
    pub const WRITE_PATH: &str = "write_path";
    pub const REMOTE: &str = "remote";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    #[serde(default)]
    pub context: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Query over the ring buffer. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Exact level.
    pub level: Option<LogLevel>,
    /// Level at or above.
    pub min_level: Option<LogLevel>,
    pub category: Option<String>,
    /// Inclusive lower bound on `timestamp`.
    pub since: Option<DateTime<Utc>>,
}

impl LogFilter {
    fn matches(&self, entry: &LogEntry) -> bool {
        self.level.is_none_or(|l| entry.level == l)
            && self.min_level.is_none_or(|l| entry.level >= l)
            && self
                .category
                .as_deref()
                .is_none_or(|c| entry.category == c)
            && self.since.is_none_or(|s| entry.timestamp >= s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    pub total: usize,
    pub capacity: usize,
    pub by_level: BTreeMap<LogLevel, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub durable_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogExport {
    pub exported_at: DateTime<Utc>,
    pub logs: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_logs: Option<Vec<LogEntry>>,
}

#[derive(Debug)]
pub struct StructuredLogger {
    ring: Mutex<VecDeque<LogEntry>>,
    durable: Mutex<VecDeque<LogEntry>>,
    durable_store: Arc<dyn KeyValueStore>,
    capacity: usize,
    durable_capacity: usize,
}

impl StructuredLogger {
    /// Create a logger, reloading any overflow entries left in `durable_store`.
    #[must_use]
    pub fn new(
        durable_store: Arc<dyn KeyValueStore>,
        capacity: usize,
        durable_capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        let durable_capacity = durable_capacity.max(1);

        let mut restored: VecDeque<LogEntry> = durable_store
            .get(DURABLE_LOG_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<LogEntry>>(&raw) {
                Ok(entries) => Some(entries),
                Err(error) => {
                    tracing::warn!(%error, "durable log overflow is unreadable; discarding");
                    None
                }
            })
            .unwrap_or_default()
            .into();
        while restored.len() > durable_capacity {
            restored.pop_front();
        }

        Self {
            ring: Mutex::new(VecDeque::with_capacity(capacity)),
            durable: Mutex::new(restored),
            durable_store,
            capacity,
            durable_capacity,
        }
    }

    /// Append an entry. `context` is usually a `json!({...})` object; other
    /// values are wrapped under `"value"`.
    pub fn log(&self, level: LogLevel, category: &str, message: &str, context: Value) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            category: category.to_string(),
            message: message.to_string(),
            context: into_context(context),
            stack: level
                .is_severe()
                .then(|| Backtrace::force_capture().to_string()),
        };

        forward_to_tracing(&entry);

        if level.is_severe() {
            self.push_durable(entry.clone());
        }

        let mut ring = self.ring.lock().unwrap_or_else(PoisonError::into_inner);
        while ring.len() >= self.capacity {
            ring.pop_front();
        }
        ring.push_back(entry);
    }

    pub fn debug(&self, category: &str, message: &str, context: Value) {
        self.log(LogLevel::Debug, category, message, context);
    }

    pub fn info(&self, category: &str, message: &str, context: Value) {
        self.log(LogLevel::Info, category, message, context);
    }

    pub fn warn(&self, category: &str, message: &str, context: Value) {
        self.log(LogLevel::Warn, category, message, context);
    }

    pub fn error(&self, category: &str, message: &str, context: Value) {
        self.log(LogLevel::Error, category, message, context);
    }

    pub fn critical(&self, category: &str, message: &str, context: Value) {
        self.log(LogLevel::Critical, category, message, context);
    }

    fn push_durable(&self, entry: LogEntry) {
        let mut durable = self.durable.lock().unwrap_or_else(PoisonError::into_inner);
        while durable.len() >= self.durable_capacity {
            durable.pop_front();
        }
        durable.push_back(entry);
        match serde_json::to_string(&*durable) {
            Ok(encoded) => self.durable_store.set(DURABLE_LOG_KEY, &encoded),
            Err(error) => tracing::warn!(%error, "failed to encode durable log overflow"),
        }
    }

    /// Ring-buffer entries matching `filter`, oldest first.
    #[must_use]
    pub fn get_logs(&self, filter: &LogFilter) -> Vec<LogEntry> {
        self.ring
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Durable overflow entries, oldest first.
    #[must_use]
    pub fn durable_logs(&self) -> Vec<LogEntry> {
        self.durable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> LogStats {
        let ring = self.ring.lock().unwrap_or_else(PoisonError::into_inner);
        let mut by_level = BTreeMap::new();
        let mut by_category = BTreeMap::new();
        for entry in ring.iter() {
            *by_level.entry(entry.level).or_insert(0) += 1;
            *by_category.entry(entry.category.clone()).or_insert(0) += 1;
        }
        LogStats {
            total: ring.len(),
            capacity: self.capacity,
            by_level,
            by_category,
            durable_count: self
                .durable
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        }
    }

    #[must_use]
    pub fn export(&self, include_critical: bool) -> LogExport {
        LogExport {
            exported_at: Utc::now(),
            logs: self.get_logs(&LogFilter::default()),
            critical_logs: include_critical.then(|| self.durable_logs()),
        }
    }

    /// Empty the ring buffer. The durable overflow is untouched.
    pub fn clear(&self) {
        self.ring
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn clear_durable(&self) {
        self.durable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.durable_store.remove(DURABLE_LOG_KEY);
    }
}

fn into_context(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Null => BTreeMap::new(),
        Value::Object(map) => map.into_iter().collect(),
        other => BTreeMap::from([("value".to_string(), other)]),
    }
}

fn forward_to_tracing(entry: &LogEntry) {
    let category = entry.category.as_str();
    let message = entry.message.as_str();
    let encoded = if entry.context.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&entry.context).unwrap_or_default()
    };
    let context = encoded.as_str();
    match entry.level {
        LogLevel::Debug => tracing::debug!(category, context, "{message}"),
        LogLevel::Info => tracing::info!(category, context, "{message}"),
        LogLevel::Warn => tracing::warn!(category, context, "{message}"),
        LogLevel::Error => tracing::error!(category, context, "{message}"),
        LogLevel::Critical => tracing::error!(critical = true, category, context, "{message}"),
    }
}
