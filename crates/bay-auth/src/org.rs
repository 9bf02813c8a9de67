//! Tenant (org) resolution for the acting principal.
//!
//! The profile table is looked up by user id first. When that lookup is
//! rejected by an access policy or finds nothing, a second lookup by email
//! (most recently updated profile wins) is attempted. Resolution never fails:
//! the worst outcome is an [`OrgContext`] with no org, and callers decide how
//! to scope from there.

use std::sync::Arc;

use bay_core::enums::TelemetryKey;
use bay_core::identity::{OrgContext, Principal};
use bay_remote::{RemoteError, RemoteStore, SelectQuery};
use bay_session::Diagnostics;
use bay_session::logger::category;
use serde_json::{Value, json};

use crate::access::is_access_denied;

const PROFILE_COLUMNS: &str = "id,org_id,email,updated_at";

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileRow {
    org_id: Option<String>,
    email: Option<String>,
}

impl ProfileRow {
    fn from_value(row: &Value) -> Self {
        Self {
            org_id: text_field(row, "org_id"),
            email: text_field(row, "email"),
        }
    }
}

fn text_field(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub struct OrgContextResolver {
    store: Arc<dyn RemoteStore>,
    diagnostics: Arc<Diagnostics>,
    profile_table: String,
}

impl OrgContextResolver {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        diagnostics: Arc<Diagnostics>,
        profile_table: impl Into<String>,
    ) -> Self {
        Self {
            store,
            diagnostics,
            profile_table: profile_table.into(),
        }
    }

    /// Resolve the org for `principal`. Never fails.
    pub async fn resolve(&self, principal: &Principal) -> OrgContext {
        let reason = match self.by_user_id(&principal.user_id).await {
            Ok(Some(profile)) if profile.org_id.is_some() => {
                return OrgContext {
                    org_id: profile.org_id,
                    user_id: Some(principal.user_id.clone()),
                    user_email: principal.email.clone().or(profile.email),
                };
            }
            Ok(_) => "no profile row for user id".to_string(),
            Err(error) if is_access_denied(&error) => {
                format!("profile lookup denied: {}", error.message)
            }
            Err(error) => {
                return self.unresolved(principal, &format!("profile lookup failed: {error}"));
            }
        };

        let Some(email) = principal.email.as_deref() else {
            return self.unresolved(principal, &format!("{reason}; no email to fall back on"));
        };

        match self.by_email(email).await {
            Ok(Some(ProfileRow {
                org_id: Some(org_id),
                ..
            })) => {
                self.diagnostics
                    .telemetry()
                    .increment(TelemetryKey::OrgContextRecovery);
                self.diagnostics.logger().warn(
                    category::ORG_CONTEXT,
                    "org resolved by email fallback",
                    json!({
                        "user_id": principal.user_id,
                        "org_id": org_id,
                        "reason": reason,
                    }),
                );
                OrgContext {
                    org_id: Some(org_id),
                    user_id: Some(principal.user_id.clone()),
                    user_email: Some(email.to_string()),
                }
            }
            Ok(_) => self.unresolved(principal, &format!("{reason}; no profile for email")),
            Err(error) => {
                self.unresolved(principal, &format!("{reason}; email lookup failed: {error}"))
            }
        }
    }

    async fn by_user_id(&self, user_id: &str) -> Result<Option<ProfileRow>, RemoteError> {
        let query = SelectQuery::new(self.profile_table.as_str())
            .select(PROFILE_COLUMNS)
            .eq("id", user_id)
            .limit(1);
        let rows = self.store.select(&query).await?;
        Ok(rows.first().map(ProfileRow::from_value))
    }

    async fn by_email(&self, email: &str) -> Result<Option<ProfileRow>, RemoteError> {
        let query = SelectQuery::new(self.profile_table.as_str())
            .select(PROFILE_COLUMNS)
            .eq("email", email)
            .order("updated_at", true)
            .limit(1);
        let rows = self.store.select(&query).await?;
        Ok(rows.first().map(ProfileRow::from_value))
    }

    fn unresolved(&self, principal: &Principal, reason: &str) -> OrgContext {
        self.diagnostics
            .telemetry()
            .increment(TelemetryKey::OrgContextUnresolved);
        self.diagnostics.logger().warn(
            category::ORG_CONTEXT,
            "org context unresolved",
            json!({ "user_id": principal.user_id, "reason": reason }),
        );
        OrgContext::unresolved(Some(principal))
    }
}
