//! Fallback-invocation counters.
//!
//! Counters live in the session store as `telemetry_<name>` → decimal string,
//! falling back to the durable store when no session store exists. They only
//! grow within a session until explicitly reset. The last-reset stamp lives in
//! the durable store whenever one exists, so it outlives the process.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

const COUNTER_PREFIX: &str = "telemetry_";
const LAST_RESET_KEY: &str = "telemetryLastReset";

/// Export/import envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryExport {
    pub timestamp: DateTime<Utc>,
    pub counters: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    /// `session`, `durable`, or `none`.
    pub backing_store: String,
    pub seconds_since_reset: Option<i64>,
    pub counters: BTreeMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct Telemetry {
    session: Arc<dyn KeyValueStore>,
    durable: Arc<dyn KeyValueStore>,
}

impl Telemetry {
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>, durable: Arc<dyn KeyValueStore>) -> Self {
        let telemetry = Self { session, durable };
        if let Some(store) = telemetry.stamp_store()
            && store.get(LAST_RESET_KEY).is_none()
        {
            store.set(LAST_RESET_KEY, &Utc::now().to_rfc3339());
        }
        telemetry
    }

    fn active(&self) -> Option<&Arc<dyn KeyValueStore>> {
        [&self.session, &self.durable]
            .into_iter()
            .find(|store| store.is_available())
    }

    /// Where the last-reset time is kept: durable first.
    fn stamp_store(&self) -> Option<&Arc<dyn KeyValueStore>> {
        [&self.durable, &self.session]
            .into_iter()
            .find(|store| store.is_available())
    }

    fn counter_key(key: &str) -> String {
        format!("{COUNTER_PREFIX}{key}")
    }

    fn read(store: &dyn KeyValueStore, key: &str) -> u64 {
        store
            .get(&Self::counter_key(key))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn counters_in(store: &dyn KeyValueStore) -> BTreeMap<String, u64> {
        store
            .keys_with_prefix(COUNTER_PREFIX)
            .into_iter()
            .filter_map(|full| {
                let value = store.get(&full)?.parse().ok()?;
                Some((full[COUNTER_PREFIX.len()..].to_string(), value))
            })
            .collect()
    }

    /// Bump a counter and return its new value (0 when no store is available).
    pub fn increment(&self, key: impl AsRef<str>) -> u64 {
        let key = key.as_ref();
        let Some(store) = self.active() else {
            return 0;
        };
        let next = Self::read(store.as_ref(), key).saturating_add(1);
        store.set(&Self::counter_key(key), &next.to_string());
        next
    }

    #[must_use]
    pub fn get(&self, key: impl AsRef<str>) -> u64 {
        self.active()
            .map_or(0, |store| Self::read(store.as_ref(), key.as_ref()))
    }

    #[must_use]
    pub fn get_all(&self) -> BTreeMap<String, u64> {
        self.active()
            .map(|store| Self::counters_in(store.as_ref()))
            .unwrap_or_default()
    }

    /// Zero every counter, including persisted copies, and stamp the reset time.
    pub fn reset_all(&self) {
        for store in [&self.session, &self.durable] {
            if !store.is_available() {
                continue;
            }
            for key in store.keys_with_prefix(COUNTER_PREFIX) {
                store.remove(&key);
            }
        }
        if let Some(store) = self.stamp_store() {
            store.set(LAST_RESET_KEY, &Utc::now().to_rfc3339());
        }
    }

    #[must_use]
    pub fn export(&self) -> TelemetryExport {
        TelemetryExport {
            timestamp: Utc::now(),
            counters: self.get_all(),
        }
    }

    /// Apply an exported envelope.
    ///
    /// All-or-nothing: returns `false` and changes nothing when the input is not
    /// JSON, lacks a `counters` object, or any counter is not a non-negative
    /// integer. Counters present in the payload overwrite current values.
    #[must_use]
    pub fn import(&self, json: &str) -> bool {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
            return false;
        };
        let Some(counters) = value.get("counters").and_then(serde_json::Value::as_object) else {
            return false;
        };
        let mut parsed = Vec::with_capacity(counters.len());
        for (key, count) in counters {
            match count.as_u64() {
                Some(count) if !key.is_empty() => parsed.push((key.as_str(), count)),
                _ => return false,
            }
        }
        let Some(store) = self.active() else {
            return false;
        };
        for (key, count) in parsed {
            store.set(&Self::counter_key(key), &count.to_string());
        }
        true
    }

    /// Mirror session counters into the durable store. Returns how many were written.
    pub fn persist(&self) -> usize {
        if !self.session.is_available() || !self.durable.is_available() {
            return 0;
        }
        let counters = Self::counters_in(self.session.as_ref());
        for (key, count) in &counters {
            self.durable.set(&Self::counter_key(key), &count.to_string());
        }
        counters.len()
    }

    /// Load durable counters into the session store. Returns how many were read.
    pub fn restore(&self) -> usize {
        if !self.session.is_available() || !self.durable.is_available() {
            return 0;
        }
        let counters = Self::counters_in(self.durable.as_ref());
        for (key, count) in &counters {
            self.session.set(&Self::counter_key(key), &count.to_string());
        }
        counters.len()
    }

    #[must_use]
    pub fn summary(&self) -> TelemetrySummary {
        let active = self.active();
        let seconds_since_reset = self
            .stamp_store()
            .and_then(|store| store.get(LAST_RESET_KEY))
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|at| (Utc::now() - at.with_timezone(&Utc)).num_seconds());
        TelemetrySummary {
            backing_store: active.map_or("none", |s| s.name()).to_string(),
            seconds_since_reset,
            counters: self.get_all(),
        }
    }
}
