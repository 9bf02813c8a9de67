//! REST query layer connection settings.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

fn default_schema() -> String {
    "public".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Project base URL (e.g., `https://abc.example.co`). The REST layer lives
    /// under `/rest/v1`.
    #[serde(default)]
    pub url: String,

    /// Public API key sent as the `apikey` header.
    #[serde(default)]
    pub anon_key: String,

    /// User access token (JWT). Falls back to `anon_key` when empty.
    #[serde(default)]
    pub access_token: String,

    /// Database schema exposed by the REST layer.
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            access_token: String::new(),
            schema: default_schema(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Check if the minimum fields for remote access are present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Base endpoint of the REST query layer, without a trailing slash.
    pub fn rest_endpoint(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }

    /// Token for the `Authorization: Bearer` header.
    pub fn bearer_token(&self) -> &str {
        if self.access_token.is_empty() {
            &self.anon_key
        } else {
            &self.access_token
        }
    }
}
