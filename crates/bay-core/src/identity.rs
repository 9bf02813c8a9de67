use serde::{Deserialize, Serialize};

/// The acting user as known to the remote store's auth layer.
///
/// Produced by `bay-auth` (access token payload) or supplied directly by the
/// embedding application. Contains only data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Primary identifier (the token `sub` claim).
    pub user_id: String,
    /// Verified contact address, used for the secondary tenant lookup.
    pub email: Option<String>,
}

impl Principal {
    #[must_use]
    pub fn new(user_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email,
        }
    }
}

/// Tenant scope resolved for a single call. Never cached.
///
/// `org_id == None` means the tenant could not be resolved; callers decide how
/// to scope in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgContext {
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

impl OrgContext {
    /// Context for a principal whose org could not be resolved.
    #[must_use]
    pub fn unresolved(principal: Option<&Principal>) -> Self {
        Self {
            org_id: None,
            user_id: principal.map(|p| p.user_id.clone()),
            user_email: principal.and_then(|p| p.email.clone()),
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.org_id.is_some()
    }
}
