use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;

/// Process-lifetime store.
#[derive(Debug)]
pub struct MemoryStore {
    label: &'static str,
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// A store reporting itself as `session`.
    #[must_use]
    pub fn new() -> Self {
        Self::labeled("session")
    }

    #[must_use]
    pub fn labeled(label: &'static str) -> Self {
        Self {
            label,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> T {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        self.label
    }

    fn get(&self, key: &str) -> Option<String> {
        self.with(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        self.with(|m| m.insert(key.to_string(), value.to_string()));
    }

    fn remove(&self, key: &str) {
        self.with(|m| m.remove(key));
    }

    fn keys(&self) -> Vec<String> {
        self.with(|m| m.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn prefix_scan() {
        let store = MemoryStore::new();
        store.set("cap_x", "true");
        store.set("telemetry_y", "3");
        assert_eq!(store.keys_with_prefix("cap_"), vec!["cap_x".to_string()]);
        assert_eq!(store.name(), "session");
    }
}
