//! Injectable key/value storage.
//!
//! The session layer never assumes ambient platform storage exists. Callers hand
//! it a [`KeyValueStore`]; an unavailable store turns every operation into a
//! no-op with safe defaults instead of an error.

mod file;
mod memory;
mod unavailable;

use std::fmt;
use std::sync::Arc;

use bay_config::SessionConfig;

pub use file::{FileStore, StoreError};
pub use memory::MemoryStore;
pub use unavailable::UnavailableStore;

/// String key/value storage. Implementations swallow their own I/O failures.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Short label reported in telemetry summaries (`session`, `durable`, `none`).
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;

    /// Keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect()
    }
}

/// The pair of stores handed to [`Diagnostics`](crate::Diagnostics).
///
/// `session` lives as long as the process; `durable` outlives it.
#[derive(Debug, Clone)]
pub struct SessionStores {
    pub session: Arc<dyn KeyValueStore>,
    pub durable: Arc<dyn KeyValueStore>,
}

impl SessionStores {
    /// Both stores in memory (tests, non-interactive embedding).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            session: Arc::new(MemoryStore::new()),
            durable: Arc::new(MemoryStore::labeled("durable")),
        }
    }

    /// Neither store available. Everything degrades to no-ops.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            session: Arc::new(UnavailableStore),
            durable: Arc::new(UnavailableStore),
        }
    }

    /// In-memory session store plus a file-backed durable store under the
    /// configured state directory. Falls back to an unavailable durable store
    /// when the directory cannot be used.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        let durable: Arc<dyn KeyValueStore> = match config.state_path() {
            Some(dir) => match FileStore::open(dir.join("state.json")) {
                Ok(store) => Arc::new(store),
                Err(error) => {
                    tracing::warn!(%error, "durable store unavailable; continuing without it");
                    Arc::new(UnavailableStore)
                }
            },
            None => {
                tracing::warn!("no state directory resolved; durable store disabled");
                Arc::new(UnavailableStore)
            }
        };
        Self {
            session: Arc::new(MemoryStore::new()),
            durable,
        }
    }
}
