use std::sync::Arc;

use anyhow::Context;
use bay_auth::TokenClaims;
use bay_config::BayConfig;
use bay_core::identity::Principal;
use bay_db::BayService;
use bay_remote::RestClient;
use bay_session::{Diagnostics, SessionStores};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: BayConfig,
    pub diagnostics: Arc<Diagnostics>,
    /// `None` when the remote section is not configured; diagnostics commands
    /// still work without it.
    pub service: Option<BayService>,
    pub principal: Option<Principal>,
}

impl AppContext {
    /// Build the session diagnostics and, when configured, the remote service.
    pub fn init(config: BayConfig) -> anyhow::Result<Self> {
        let stores = SessionStores::from_config(&config.session);
        Self::with_stores(config, stores)
    }

    fn with_stores(config: BayConfig, stores: SessionStores) -> anyhow::Result<Self> {
        let diagnostics = Arc::new(Diagnostics::init(stores, &config.session));
        if config.session.persist_telemetry {
            let restored = diagnostics.telemetry().restore();
            tracing::debug!(restored, "restored telemetry counters");
        }

        let principal = resolve_principal(&config);

        let service = if config.remote.is_configured() {
            let client = RestClient::new(&config.remote)
                .context("failed to build remote REST client")?;
            Some(BayService::new(
                Arc::new(client),
                diagnostics.clone(),
                config.tenancy.clone(),
                principal.clone(),
            ))
        } else {
            None
        };

        Ok(Self {
            config,
            diagnostics,
            service,
            principal,
        })
    }

    /// The remote-backed service, or an error naming the missing settings.
    pub fn require_service(&self) -> anyhow::Result<&BayService> {
        self.config.require_remote()?;
        self.service
            .as_ref()
            .context("remote service was not initialized")
    }

    /// Mirror session counters to the durable store when enabled.
    pub fn finish(&self) {
        if self.config.session.persist_telemetry {
            let persisted = self.diagnostics.telemetry().persist();
            tracing::debug!(persisted, "persisted telemetry counters");
        }
    }
}

fn resolve_principal(config: &BayConfig) -> Option<Principal> {
    let token = config.remote.access_token.trim();
    if token.is_empty() {
        return None;
    }
    match TokenClaims::decode(token) {
        Ok(claims) => {
            if claims.is_expired() {
                tracing::warn!(user_id = %claims.user_id, "access token has expired");
            }
            Some(claims.to_principal())
        }
        Err(error) => {
            tracing::warn!(%error, "could not decode access token; continuing without a principal");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_remote_settings_name_the_variables() {
        let mut config = BayConfig::default();
        config.session.persist_telemetry = false;
        config.remote.url = "https://shop.example.co".into();
        let ctx = AppContext::with_stores(config, SessionStores::in_memory()).unwrap();

        assert!(ctx.service.is_none());
        let message = ctx.require_service().err().unwrap().to_string();
        assert_eq!(
            message,
            "remote settings are not configured; set BAYLINE_REMOTE__ANON_KEY"
        );
    }

    #[test]
    fn configured_remote_builds_the_service() {
        let mut config = BayConfig::default();
        config.remote.url = "https://shop.example.co".into();
        config.remote.anon_key = "anon".into();
        let ctx = AppContext::with_stores(config, SessionStores::in_memory()).unwrap();
        assert!(ctx.require_service().is_ok());
    }
}
