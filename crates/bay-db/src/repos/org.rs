//! Tenant context for the service's principal.

use bay_core::identity::OrgContext;

use crate::service::BayService;

impl BayService {
    /// Resolve the org for the acting principal. Computed on every call and
    /// never fails; `org_id` is `None` when it cannot be determined.
    pub async fn org_context(&self) -> OrgContext {
        match self.principal() {
            Some(principal) => self.org_resolver().resolve(principal).await,
            None => {
                tracing::debug!("no principal; org context unresolved");
                OrgContext::unresolved(None)
            }
        }
    }
}
