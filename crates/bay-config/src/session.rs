//! Session state, telemetry and log buffer settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const fn default_log_capacity() -> usize {
    100
}

const fn default_durable_log_capacity() -> usize {
    50
}

const fn default_persist_telemetry() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory for the longer-lived store. Empty means the platform data dir.
    #[serde(default)]
    pub state_dir: String,

    /// Ring buffer size for the structured logger.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Cap on the durable overflow of `error`/`critical` entries.
    #[serde(default = "default_durable_log_capacity")]
    pub durable_log_capacity: usize,

    /// Mirror telemetry counters into the durable store at exit.
    #[serde(default = "default_persist_telemetry")]
    pub persist_telemetry: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: String::new(),
            log_capacity: default_log_capacity(),
            durable_log_capacity: default_durable_log_capacity(),
            persist_telemetry: default_persist_telemetry(),
        }
    }
}

impl SessionConfig {
    /// Resolved durable state directory, if one can be determined.
    pub fn state_path(&self) -> Option<PathBuf> {
        if self.state_dir.is_empty() {
            dirs::data_local_dir().map(|p| p.join("bayline"))
        } else {
            Some(PathBuf::from(&self.state_dir))
        }
    }
}
