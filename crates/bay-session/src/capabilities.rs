//! Capability flag store.
//!
//! One tri-state flag per [`Capability`], stored as `cap_<name>` → `"true"` /
//! `"false"`. Key absence means unknown. Flags are optimistic beliefs, not a
//! permanent negative cache: a session reset returns every flag to unknown, and
//! a caller that succeeds on the gated path re-promotes it.

use std::collections::BTreeMap;
use std::sync::Arc;

use bay_core::enums::{Capability, CapabilityState};

use crate::storage::KeyValueStore;

const CAPABILITY_PREFIX: &str = "cap_";

/// Exported flag values. Unknown flags are omitted.
pub type CapabilitySnapshot = BTreeMap<Capability, bool>;

#[derive(Debug, Clone)]
pub struct CapabilityFlags {
    store: Arc<dyn KeyValueStore>,
}

impl CapabilityFlags {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current belief. Unknown when unset or when storage is unavailable.
    #[must_use]
    pub fn get(&self, capability: Capability) -> CapabilityState {
        match self.store.get(&capability.storage_key()).as_deref() {
            Some("true") => CapabilityState::Confirmed,
            Some("false") => CapabilityState::Degraded,
            _ => CapabilityState::Unknown,
        }
    }

    pub fn set(&self, capability: Capability, usable: bool) {
        let previous = self.get(capability);
        let next = previous.observe(usable);
        self.store
            .set(&capability.storage_key(), if usable { "true" } else { "false" });
        if previous != next {
            tracing::debug!(%capability, from = %previous, to = %next, "capability transition");
        }
    }

    pub fn reset(&self, capability: Capability) {
        self.store.remove(&capability.storage_key());
    }

    /// Return every flag to unknown, including stray `cap_` keys.
    pub fn reset_all(&self) {
        for key in self.store.keys_with_prefix(CAPABILITY_PREFIX) {
            self.store.remove(&key);
        }
        for capability in Capability::ALL {
            self.store.remove(&capability.storage_key());
        }
    }

    /// State of every known capability, including unknown ones.
    #[must_use]
    pub fn states(&self) -> Vec<(Capability, CapabilityState)> {
        Capability::ALL
            .into_iter()
            .map(|cap| (cap, self.get(cap)))
            .collect()
    }

    #[must_use]
    pub fn export_all(&self) -> CapabilitySnapshot {
        self.states()
            .into_iter()
            .filter_map(|(cap, state)| state.as_bool().map(|v| (cap, v)))
            .collect()
    }

    /// Apply a `{name: bool}` JSON object. All-or-nothing: any parse error,
    /// unknown name, or non-boolean value leaves every flag untouched.
    #[must_use]
    pub fn import_all(&self, json: &str) -> bool {
        let Ok(raw) = serde_json::from_str::<BTreeMap<String, bool>>(json) else {
            return false;
        };
        let mut parsed = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            match name.parse::<Capability>() {
                Ok(cap) => parsed.push((cap, value)),
                Err(_) => return false,
            }
        }
        for (cap, value) in parsed {
            self.set(cap, value);
        }
        true
    }
}
