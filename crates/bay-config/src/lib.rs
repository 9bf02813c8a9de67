//! # bay-config
//!
//! Layered configuration loading for Bayline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BAYLINE_*` prefix, `__` as separator)
//! 2. Project-level `.bayline/config.toml`
//! 3. User-level `~/.config/bayline/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `BAYLINE_REMOTE__URL` -> `remote.url`,
//! `BAYLINE_SESSION__LOG_CAPACITY` -> `session.log_capacity`, etc.
//!
//! ```no_run
//! use bay_config::BayConfig;
//!
//! let config = BayConfig::load_with_dotenv().expect("config");
//! if config.remote.is_configured() {
//!     println!("REST endpoint: {}", config.remote.rest_endpoint());
//! }
//! ```

mod error;
mod remote;
mod session;
mod tenancy;

pub use error::ConfigError;
pub use remote::RemoteConfig;
pub use session::SessionConfig;
pub use tenancy::TenancyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BayConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tenancy: TenancyConfig,
}

impl BayConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`BayConfig::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer more providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".bayline/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("BAYLINE_").split("__"))
    }

    /// Reject capacities and timeouts the session and remote layers cannot
    /// operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        ConfigError::check_minimum("session.log_capacity", capacity(self.session.log_capacity), 1)?;
        ConfigError::check_minimum(
            "session.durable_log_capacity",
            capacity(self.session.durable_log_capacity),
            1,
        )?;
        ConfigError::check_minimum("remote.timeout_secs", self.remote.timeout_secs, 1)
    }

    /// Fail with `NotConfigured`, naming the unset variables, unless the
    /// remote section is usable.
    pub fn require_remote(&self) -> Result<&RemoteConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.remote.url.is_empty() {
            missing.push("BAYLINE_REMOTE__URL");
        }
        if self.remote.anon_key.is_empty() {
            missing.push("BAYLINE_REMOTE__ANON_KEY");
        }
        if missing.is_empty() {
            Ok(&self.remote)
        } else {
            Err(ConfigError::NotConfigured {
                section: "remote",
                missing,
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bayline").join("config.toml"))
    }
}
