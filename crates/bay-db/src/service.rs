//! Service layer wrapping every drift-prone remote call.
//!
//! `BayService` holds the remote store, the session [`Diagnostics`], the
//! classifier and the acting principal. Repo methods are implemented as
//! `impl BayService` blocks under `repos/`.

use std::sync::Arc;

use bay_auth::{OrgContextResolver, remap_permission_error};
use bay_config::TenancyConfig;
use bay_core::identity::Principal;
use bay_remote::{RemoteError, RemoteStore};
use bay_session::Diagnostics;

use crate::classify::{QueryLayerClassifier, SchemaClassifier};

pub struct BayService {
    store: Arc<dyn RemoteStore>,
    diagnostics: Arc<Diagnostics>,
    classifier: Arc<dyn SchemaClassifier>,
    tables: TenancyConfig,
    principal: Option<Principal>,
}

impl BayService {
    #[must_use]
    pub fn new(
        store: Arc<dyn RemoteStore>,
        diagnostics: Arc<Diagnostics>,
        tables: TenancyConfig,
        principal: Option<Principal>,
    ) -> Self {
        Self {
            store,
            diagnostics,
            classifier: Arc::new(QueryLayerClassifier),
            tables,
            principal,
        }
    }

    /// Swap the classification rules (e.g. for a different backend).
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn SchemaClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn SchemaClassifier {
        self.classifier.as_ref()
    }

    #[must_use]
    pub const fn tables(&self) -> &TenancyConfig {
        &self.tables
    }

    #[must_use]
    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub(crate) fn org_resolver(&self) -> OrgContextResolver {
        OrgContextResolver::new(
            self.store.clone(),
            self.diagnostics.clone(),
            self.tables.profile_table.clone(),
        )
    }

    /// Rewrite identity-table policy denials into remediation guidance.
    pub(crate) fn remap(&self, error: RemoteError) -> RemoteError {
        remap_permission_error(
            error,
            &self.tables.identity_table,
            &self.tables.profile_table,
        )
    }
}
