//! The single owner of session-scoped resilience state.
//!
//! Construct once per session with [`Diagnostics::init`] and share as
//! `Arc<Diagnostics>`. Nothing in this crate keeps module-level mutable state,
//! so separate instances never leak into each other (tests build their own).

use bay_config::SessionConfig;
use bay_core::enums::{Capability, SchemaErrorKind};
use serde_json::json;

use crate::capabilities::CapabilityFlags;
use crate::logger::{StructuredLogger, category};
use crate::storage::SessionStores;
use crate::telemetry::Telemetry;

#[derive(Debug)]
pub struct Diagnostics {
    stores: SessionStores,
    capabilities: CapabilityFlags,
    telemetry: Telemetry,
    logger: StructuredLogger,
}

impl Diagnostics {
    /// Build the service over the given stores.
    ///
    /// Capability flags live in the session store; the durable log overflow is
    /// reloaded from the durable store.
    #[must_use]
    pub fn init(stores: SessionStores, config: &SessionConfig) -> Self {
        let capabilities = CapabilityFlags::new(stores.session.clone());
        let telemetry = Telemetry::new(stores.session.clone(), stores.durable.clone());
        let logger = StructuredLogger::new(
            stores.durable.clone(),
            config.log_capacity,
            config.durable_log_capacity,
        );
        Self {
            stores,
            capabilities,
            telemetry,
            logger,
        }
    }

    /// Fully in-memory instance with default capacities.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::init(SessionStores::in_memory(), &SessionConfig::default())
    }

    #[must_use]
    pub const fn capabilities(&self) -> &CapabilityFlags {
        &self.capabilities
    }

    #[must_use]
    pub const fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    #[must_use]
    pub const fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    #[must_use]
    pub const fn stores(&self) -> &SessionStores {
        &self.stores
    }

    /// Record that `capability` is unusable: flag it `false`, bump its counter
    /// and emit a `warn` capability-fallback event.
    pub fn record_fallback(&self, capability: Capability, kind: SchemaErrorKind, detail: &str) {
        self.capabilities.set(capability, false);
        let count = self.telemetry.increment(capability.fallback_counter());
        self.logger.warn(
            category::CAPABILITY,
            "capability fallback",
            json!({
                "capability": capability.as_str(),
                "classification": kind.as_str(),
                "counter": capability.fallback_counter().as_str(),
                "count": count,
                "detail": detail,
            }),
        );
    }

    /// Return every capability to unknown (a new session's beliefs).
    pub fn reset_session(&self) {
        self.capabilities.reset_all();
        self.logger
            .info(category::CAPABILITY, "capability flags reset", json!({}));
    }

    /// Clear flags, counters and both log buffers.
    pub fn reset_all(&self) {
        self.capabilities.reset_all();
        self.telemetry.reset_all();
        self.logger.clear();
        self.logger.clear_durable();
    }
}
